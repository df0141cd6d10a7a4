pub mod ip_geolocation;

pub use ip_geolocation::{IpApiResponse, IpLocation, IpLookupClient};
