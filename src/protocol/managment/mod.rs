//! Unit identity on the J1939 network: the 64-bit NAME announced by the node.
//! Address claiming itself is left to the driver.
pub mod iso_name;
