pub mod card_use_case;
pub mod ports;
