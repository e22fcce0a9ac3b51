pub mod seedlist;

pub use seedlist::{
    ResolveSeedlistUseCase, ResolveSrvHostsUseCase, ResolveTxtOptionsUseCase, Seedlist,
};
