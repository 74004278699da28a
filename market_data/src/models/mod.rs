pub mod bar;
pub mod period;
pub mod request;
pub mod series;
