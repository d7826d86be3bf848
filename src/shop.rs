//! Shop-info module: `KEY=value` metadata written into class-designated slots.

mod contact;
mod info;
mod populate;

pub use contact::{
    tel_link,
    whatsapp_link,
};
pub use info::ShopInfo;
pub use populate::{
    ShopInfoModule,
    load_shop_info,
};
