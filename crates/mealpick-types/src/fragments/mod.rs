mod static_fragment;

pub use static_fragment::StaticFragment;
