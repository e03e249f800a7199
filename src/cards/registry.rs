//! The card catalog.
//!
//! `Catalog` stores every design in file order plus a case-insensitive
//! name lookup, and the fixed list of action card designs. It is built
//! once and never mutated, so games share it behind an `Arc`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashMap;

use super::definition::{ActionDesign, Design, DesignId};
use super::error::CatalogError;
use super::parser::{parse_designs, CatalogParser};
use crate::core::GameAction;

/// Action cards in the order they are dealt to each player.
const ACTION_CARDS: [GameAction; 7] = GameAction::BASE;

/// Loaded card catalog.
///
/// ## Example
///
/// ```
/// use rust_tableau::cards::{Catalog, DesignId};
///
/// let catalog = Catalog::parse("N:Old Earth\nT:1:3:2\nE:base@0:1\nN:Gene Mill\nT:2:3:1\nE:base@0:2\n").unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.by_name("GENE MILL").unwrap().id, DesignId::new(1));
/// assert!(catalog.by_name("Missing").is_none());
/// assert_eq!(catalog.image_name(DesignId::new(1)).as_deref(), Some("card001"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    designs: Vec<Design>,
    lookup: FxHashMap<String, DesignId>,
    actions: Vec<ActionDesign>,
}

impl Catalog {
    /// Build a catalog from already-parsed designs.
    ///
    /// Each design's id is reset to its position.
    #[must_use]
    pub fn from_designs(mut designs: Vec<Design>) -> Self {
        let mut lookup = FxHashMap::default();
        for (index, design) in designs.iter_mut().enumerate() {
            design.id = DesignId::new(index as u32);
            // Later designs shadow earlier ones with the same name.
            lookup.insert(design.name.to_lowercase(), design.id);
        }
        let actions = ACTION_CARDS
            .iter()
            .enumerate()
            .map(|(index, &action)| ActionDesign {
                name: action.name().to_string(),
                action,
                index,
            })
            .collect();

        tracing::info!(designs = designs.len(), "catalog loaded");
        Self {
            designs,
            lookup,
            actions,
        }
    }

    /// Parse a catalog from text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for the first bad record.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        Ok(Self::from_designs(parse_designs(text)?))
    }

    /// Parse a catalog from a reader, line by line.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if reading fails and `CatalogError::Parse`
    /// for the first bad record.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CatalogError> {
        let mut parser = CatalogParser::new();
        for (index, line) in reader.lines().enumerate() {
            parser.feed(index + 1, &line?)?;
        }
        Ok(Self::from_designs(parser.finish()?))
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read and
    /// `CatalogError::Parse` for the first bad record.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading catalog");
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Design at an index.
    #[must_use]
    pub fn get(&self, id: DesignId) -> Option<&Design> {
        self.designs.get(id.index())
    }

    /// Design at an index, as an error on a miss.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownDesign` when the index is out of range.
    pub fn require(&self, id: DesignId) -> Result<&Design, CatalogError> {
        self.get(id).ok_or(CatalogError::UnknownDesign(id.index()))
    }

    /// Design by name, ignoring case.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Design> {
        self.lookup
            .get(&name.to_lowercase())
            .and_then(|id| self.get(*id))
    }

    /// Design by name, as an error on a miss.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownName` when no design has this name.
    pub fn require_name(&self, name: &str) -> Result<&Design, CatalogError> {
        self.by_name(name)
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))
    }

    /// Number of designs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.designs.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// Designs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Design> {
        self.designs.iter()
    }

    /// Action card designs.
    #[must_use]
    pub fn actions(&self) -> &[ActionDesign] {
        &self.actions
    }

    /// Action card design by position.
    #[must_use]
    pub fn action(&self, index: usize) -> Option<&ActionDesign> {
        self.actions.get(index)
    }

    /// Action card design for an action.
    #[must_use]
    pub fn action_design(&self, action: GameAction) -> Option<&ActionDesign> {
        self.actions.iter().find(|design| design.action == action)
    }

    /// Artwork stem for a design.
    #[must_use]
    pub fn image_name(&self, id: DesignId) -> Option<String> {
        self.get(id).map(|design| format!("card{:03}", design.id.raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    const TEXT: &str = "\
N:Old Earth
T:1:3:2
E:base@0:1
N:Gene Mill
T:2:3:1
E:base@0:2
G:GENE
N:old earth
T:1:1:1
E:base@0:1
";

    #[test]
    fn test_lookup_is_case_insensitive_last_write_wins() {
        let catalog = Catalog::parse(TEXT).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.by_name("OLD EARTH").unwrap().id, DesignId::new(2));
        assert_eq!(catalog.by_name("gene mill").unwrap().card_type, CardType::Development);
    }

    #[test]
    fn test_misses_are_not_found() {
        let catalog = Catalog::parse(TEXT).unwrap();

        assert!(catalog.get(DesignId::new(3)).is_none());
        assert!(matches!(
            catalog.require(DesignId::new(3)),
            Err(CatalogError::UnknownDesign(3))
        ));
        assert!(matches!(
            catalog.require_name("Nowhere"),
            Err(CatalogError::UnknownName(name)) if name == "Nowhere"
        ));
        assert!(catalog.image_name(DesignId::new(9)).is_none());
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let from_text = Catalog::parse(TEXT).unwrap();
        let from_reader = Catalog::from_reader(TEXT.as_bytes()).unwrap();

        let a: Vec<_> = from_text.iter().collect();
        let b: Vec<_> = from_reader.iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Catalog::load("/definitely/not/here/cards.txt");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_action_designs() {
        let catalog = Catalog::default();
        assert!(catalog.actions().is_empty());

        let catalog = Catalog::parse("").unwrap();
        assert_eq!(catalog.actions().len(), 7);
        assert_eq!(catalog.action(0).unwrap().name, "EXPLORE_5_0");
        assert!(catalog.action_design(GameAction::Search).is_none());

        let produce = catalog.action_design(GameAction::Produce).unwrap();
        assert_eq!(produce.index, 6);
        assert_eq!(produce.image_name(), "action06");
    }

    #[test]
    fn test_from_designs_renumbers() {
        let mut designs = parse_designs("N:A\nT:1:0:0\nE:base@0:1\nN:B\nT:1:0:0\nE:base@0:1\n").unwrap();
        designs.reverse();
        let catalog = Catalog::from_designs(designs);

        assert_eq!(catalog.by_name("b").unwrap().id, DesignId::new(0));
        assert_eq!(catalog.require(DesignId::new(1)).unwrap().name, "A");
    }
}
