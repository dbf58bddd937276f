pub mod nav_bar;
pub mod notice_toast;
pub mod page_strip;
