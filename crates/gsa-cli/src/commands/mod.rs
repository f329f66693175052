pub mod convert;
pub mod gates;
