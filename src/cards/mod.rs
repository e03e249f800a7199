//! Card catalog: design attributes, powers, designs, parser, registry, instances.
//!
//! ## Key Types
//!
//! - `Design`: immutable blueprint for one kind of card
//! - `Catalog`: ordered designs plus a case-insensitive name lookup
//! - `CatalogParser`: line-oriented interpreter for the card text format
//! - `Card`: one physical, mutable instance of a design inside a deck
//!
//! A catalog is loaded once and shared read-only (behind an `Arc`) by any
//! number of games.

/// Fieldless enum with an upper-case text name per variant.
///
/// Generates `ALL`, `as_str`, `from_name`, `code` and `Display`. The code is
/// the declaration position, which is what the card format and the session
/// logs rely on.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => $text:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $( $variant, )*
        }

        impl $name {
            /// Every variant, in code order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )* ];

            /// Upper-case name as written in the card format.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )*
                }
            }

            /// Variant for an upper-case name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $text => Some($name::$variant), )*
                    _ => None,
                }
            }

            /// Numeric code (declaration position).
            #[must_use]
            pub const fn code(self) -> u8 {
                self as u8
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod attributes;
pub mod definition;
pub mod error;
pub mod instance;
pub mod parser;
pub mod power;
pub mod registry;

pub use attributes::{CardFlag, CardType, GoodType, VpCategory};
pub use definition::{ActionDesign, Bonus, CardExpansion, Design, DesignId, Power};
pub use error::{CatalogError, ParseErrorKind};
pub use instance::{Card, CardId};
pub use parser::{parse_designs, CatalogParser};
pub use power::{ConsumePower, DevelopPower, ExplorePower, PowerCode, ProducePower, SettlePower};
pub use registry::Catalog;
