pub mod button;
pub mod label;
pub mod layout;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use button::*;
pub use label::*;
pub use layout::*;
