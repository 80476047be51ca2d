use serde::{Deserialize, Serialize};

#[macro_export]
macro_rules! impl_builder_methods {
    ($builder:ident, $($field:ident: $field_type:ty),*) => {
        impl $builder {
            $(
                pub fn $field(mut self, $field: $field_type) -> Self {
                    self.$field = Some($field);
                    self
                }
            )*
        }
    };
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: i32,
    pub completion_tokens: i32,
    pub total_tokens: i32,
}

impl From<Usage> for mealpick_core::generic::GenericUsageReport {
    fn from(value: Usage) -> Self {
        Self {
            prompt_tokens: value.prompt_tokens.into(),
            completion_tokens: value.completion_tokens.into(),
            total_tokens: value.total_tokens.into(),
        }
    }
}
