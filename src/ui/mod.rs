pub mod panels;
pub mod plate;
pub mod plot;
