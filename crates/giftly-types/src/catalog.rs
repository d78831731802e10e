//! Closed enumerations offered by the guided wizard.
//!
//! Every chip the wizard shows is backed by one of these enums, so a
//! selection can never hold a value outside its fixed set. Each enum
//! displays and serializes as its exact label (e.g. `"Valentine's Day"`,
//! `"18–25"`). Parsing is case-insensitive and accepts an ASCII hyphen in
//! place of the en dash used by the range labels.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownValue;

/// A fixed, ordered set of labelled choices.
///
/// Implemented by every enumeration the wizard and the feedback dialog
/// present as selection chips.
pub trait ClosedSet: Copy + Eq + fmt::Display + FromStr<Err = UnknownValue> + 'static {
    /// Human-readable name of the set, used in error messages.
    const KIND: &'static str;

    /// All members in display order.
    fn all() -> &'static [Self];

    /// The exact display label of this member.
    fn label(self) -> &'static str;
}

/// Normalize a label for lenient comparison.
pub(crate) fn fold_label(s: &str) -> String {
    s.trim().to_lowercase().replace('\u{2013}', "-")
}

/// Resolve `input` against the members of `T` by folded label.
pub(crate) fn parse_member<T: ClosedSet>(input: &str) -> Result<T, UnknownValue> {
    let wanted = fold_label(input);
    T::all()
        .iter()
        .copied()
        .find(|member| fold_label(member.label()) == wanted)
        .ok_or_else(|| UnknownValue {
            kind: T::KIND,
            value: input.to_string(),
        })
}

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All members in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The exact display label.
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl $crate::catalog::ClosedSet for $name {
            const KIND: &'static str = $kind;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn label(self) -> &'static str {
                $name::label(self)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::catalog::parse_member(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use closed_set;

closed_set! {
    /// The occasion a gift is for (wizard step 1).
    Occasion, "occasion" {
        Diwali => "Diwali",
        Eid => "Eid",
        SecretSanta => "Secret Santa",
        Thanksgiving => "Thanksgiving",
        Holi => "Holi",
        Birthday => "Birthday",
        Anniversary => "Anniversary",
        Wedding => "Wedding",
        Engagement => "Engagement",
        Retirement => "Retirement",
        GetWell => "Get Well",
        Promotion => "Promotion",
        Ramadan => "Ramadan",
        Christmas => "Christmas",
        Housewarming => "Housewarming",
        NewBaby => "New Baby",
        NewJob => "New Job",
        Graduation => "Graduation",
        ValentinesDay => "Valentine's Day",
        MothersDay => "Mother's Day",
        FathersDay => "Father's Day",
    }
}

closed_set! {
    /// Who the gift is for (wizard step 2).
    Persona, "persona" {
        Friend => "Friend",
        BestFriend => "Best friend",
        Boyfriend => "Boyfriend",
        Girlfriend => "Girlfriend",
        Husband => "Husband",
        Wife => "Wife",
        Grandma => "Grandma",
        Grandpa => "Grandpa",
        Mom => "Mom",
        Dad => "Dad",
        Cousin => "Cousin",
        CoWorker => "Co-worker",
        Boss => "Boss",
        Client => "Client",
        Uncle => "Uncle",
        Aunt => "Aunt",
        Fiance => "Fiancé",
        Myself => "Self",
        Roommate => "Roommate",
        Neighbor => "Neighbor",
    }
}

closed_set! {
    /// Recipient age bracket (wizard step 3).
    AgeRange, "age range" {
        Infant => "0–2",
        Toddler => "2–4",
        Child => "4–12",
        Teen => "12–18",
        YoungAdult => "18–25",
        Adult => "26–40",
        MiddleAged => "40–60",
        Senior => "60+",
    }
}

closed_set! {
    /// Recipient gender (wizard step 4, optional).
    Gender, "gender" {
        Male => "Male",
        Female => "Female",
        Other => "Other",
        PreferNotToSay => "Prefer not to say",
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::PreferNotToSay
    }
}

closed_set! {
    /// Recipient interests (wizard step 5, up to four).
    Interest, "interest" {
        TechGadgets => "Tech gadgets",
        Food => "Food",
        Drink => "Drink",
        SnacksAndSweets => "Snacks & sweets",
        MovieAndTv => "Movie & TV",
        Music => "Music",
        ClothingAndAccessories => "Clothing & accessories",
        Beauty => "Beauty",
        SportsAndActivities => "Sports & activities",
        Pets => "Pets",
        HealthAndWellness => "Health & wellness",
        Reading => "Reading",
        Cooking => "Cooking",
        HomeDecorAndImprovement => "Home decor & improvement",
        GamesAndPuzzles => "Games & puzzles",
        ArtAndDesign => "Art & design",
        Travel => "Travel",
        Photography => "Photography",
        Fitness => "Fitness",
        Gardening => "Gardening",
        Diy => "DIY",
        BoardGames => "Board games",
        Collectibles => "Collectibles",
        Stationery => "Stationery",
    }
}

closed_set! {
    /// Budget bucket in rupees (wizard step 6).
    PriceRange, "price range" {
        From200To300 => "200–300",
        From300To600 => "300–600",
        From600To1000 => "600–1000",
        From1000To1600 => "1000–1600",
        From1600To2000 => "1600–2000",
        From2000To3000 => "2000–3000",
        From3000To4000 => "3000–4000",
        From4000To5100 => "4000–5100",
        Above5100 => "5100+",
    }
}
