//! Reusable UI components.

pub mod payment_widget;
pub mod progress_bar;
