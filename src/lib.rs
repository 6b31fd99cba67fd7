pub mod client;
pub mod error;
pub mod models;
pub mod parking;
pub mod requests;

pub use client::{SessionOwnership, ZurichClient, ZurichClientBuilder};
pub use error::{ErrorKind, ZurichError};
pub use models::{DisabledParking, FeatureCollection, SpotId};
