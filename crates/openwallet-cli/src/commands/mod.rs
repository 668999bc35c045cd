//! Command implementations

mod core;
mod trends;

pub use core::{
    cmd_init, cmd_ocr, cmd_report, cmd_serve, cmd_status, cmd_transactions_add,
    cmd_transactions_list, open_db,
};
pub use trends::cmd_trends;
