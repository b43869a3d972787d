pub mod country_picker;
pub mod ui;

pub use country_picker::CountryPicker;
