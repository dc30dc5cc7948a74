pub mod init_config;
pub mod play;
pub mod regions;
