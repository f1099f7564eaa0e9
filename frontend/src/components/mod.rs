pub mod alert_toast;
pub mod credit_display;

pub use alert_toast::AlertToast;
pub use credit_display::CreditDisplay;
