//! The situation form: enumerated choices, bounded party size and the
//! [`FormRecord`] captured on submission.
//!
//! Every choice has a stable ASCII *value* (what an HTML `<option>` posts
//! back) and a Korean *label* (what the user sees and what the serialized
//! context carries). Option order and defaults match the form as shown to
//! the user.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("party size must be between {min} and {max}, got {got}")]
    PartySizeOutOfRange { min: u8, max: u8, got: u32 },
}

/// A single-select control: a fixed, ordered set of options with one
/// default.
pub trait FormChoice: Copy + PartialEq + fmt::Debug + 'static {
    /// All options, in display order.
    const ALL: &'static [Self];

    /// Value posted by the form control.
    fn value(self) -> &'static str;

    /// Korean label shown to the user and written into the context.
    fn label(self) -> &'static str;

    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.value() == value)
    }
}

macro_rules! form_choice {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl FormChoice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

form_choice! {
    /// Who the user is eating with.
    Relationship, default = Friend {
        Friend => ("friend", "친구"),
        Coworker => ("coworker", "동료"),
        Family => ("family", "가족"),
        Partner => ("partner", "연인"),
        Alone => ("alone", "혼자"),
        Other => ("other", "기타"),
    }
}

form_choice! {
    /// Time of day the meal is for.
    MealTime, default = Lunch {
        Breakfast => ("breakfast", "아침"),
        Lunch => ("lunch", "점심"),
        Dinner => ("dinner", "저녁"),
        LateNight => ("late_night", "야식"),
        Other => ("other", "기타"),
    }
}

form_choice! {
    /// How the meal will be had. Rendered as radio buttons.
    DiningMode, default = EatingOut {
        Delivery => ("delivery", "배달"),
        EatingOut => ("eating_out", "외식"),
        HomeCooking => ("home_cooking", "집에서 요리"),
        Other => ("other", "기타"),
    }
}

form_choice! {
    /// Budget tier per person.
    Budget, default = Between10k20k {
        Any => ("any", "상관없음"),
        Under10k => ("under_10k", "1만 원 이하"),
        Between10k20k => ("between_10k_20k", "1~2만 원"),
        Over20k => ("over_20k", "2만 원 이상"),
    }
}

form_choice! {
    SpicePreference, default = Moderate {
        Mild => ("mild", "매운 것 잘 못 먹음"),
        Moderate => ("moderate", "보통"),
        Hot => ("hot", "매운 거 좋아함"),
    }
}

/// Number of diners, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub struct PartySize(u8);

impl PartySize {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;
    pub const DEFAULT: PartySize = PartySize(2);

    pub fn new(size: u32) -> Result<Self, FormError> {
        if (u32::from(Self::MIN)..=u32::from(Self::MAX)).contains(&size) {
            Ok(Self(size as u8))
        } else {
            Err(FormError::PartySizeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                got: size,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for PartySize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PartySize {
    type Error = FormError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One complete submission of the situation form.
///
/// Field names match the HTML control names, so the record deserializes
/// straight from an url-encoded body. Free-text fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormRecord {
    pub party_size: PartySize,
    pub relationship: Relationship,
    pub meal_time: MealTime,
    #[serde(default)]
    pub last_meal: String,
    pub dining_mode: DiningMode,
    pub budget: Budget,
    pub spice: SpicePreference,
    #[serde(default)]
    pub restrictions: String,
    #[serde(default)]
    pub notes: String,
}
