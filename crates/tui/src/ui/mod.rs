pub mod layout;
pub mod panel;
pub mod qr;
