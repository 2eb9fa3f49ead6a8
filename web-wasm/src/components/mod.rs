pub mod header;
pub mod product_form;
pub mod inventory_table;
pub mod export_buttons;
pub mod notice_banner;
