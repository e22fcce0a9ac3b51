pub mod resolve_seedlist;
pub mod resolve_srv_hosts;
pub mod resolve_txt_options;

pub use resolve_seedlist::{ResolveSeedlistUseCase, Seedlist};
pub use resolve_srv_hosts::ResolveSrvHostsUseCase;
pub use resolve_txt_options::ResolveTxtOptionsUseCase;
