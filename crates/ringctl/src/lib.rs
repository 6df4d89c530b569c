pub mod protocol;

pub const SOCKET_PATH: &str = "/tmp/ringmenu.sock";
