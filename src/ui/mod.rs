pub mod legend;
pub mod panels;
pub mod plot;
