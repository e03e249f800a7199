//! Line-oriented interpreter for the card text format.
//!
//! Each line starts with a one-character record code:
//!
//! | Code | Record |
//! |---|---|
//! | `#` | comment |
//! | `N:<name>` | start a new design |
//! | `T:<type>:<cost>:<vp>` | type (1 world, 2 development), cost, victory points |
//! | `E:<marker>@<index>:<count>` | expansion index and copy count |
//! | `F:<FLAG>[\|<FLAG>...]` | flags |
//! | `G:<GOOD>` | good type |
//! | `P:<phase>:<clause>[\|<clause>...]` | powers; a clause is `NAME[:value[:times]]` |
//! | `V:<point>:<CATEGORY>:<name>` | end-game bonus |
//!
//! Any other leading character (including blank lines) is skipped.
//!
//! Fields accumulate in a `DesignBuilder` for the design in progress, which
//! is committed when the next `N` record or the end of input is reached.
//! Every design needs a `T` and an `E` record.
//! Nothing half-built ever reaches the catalog: the first bad record
//! aborts the whole parse.

use std::str::FromStr;

use smallvec::SmallVec;

use super::attributes::{CardFlag, CardType, GoodType, VpCategory};
use super::definition::{Bonus, CardExpansion, Design, DesignId, Power};
use super::error::{CatalogError, ParseErrorKind};
use super::power::PowerCode;

/// Fields of the design currently being parsed.
#[derive(Debug)]
struct DesignBuilder {
    /// Line of the `N` record.
    line: usize,
    name: String,
    card_type: Option<CardType>,
    cost: u32,
    vp: i32,
    expansion: Option<CardExpansion>,
    good: GoodType,
    flags: SmallVec<[CardFlag; 4]>,
    powers: Vec<Power>,
    bonuses: Vec<Bonus>,
    source: Vec<String>,
}

impl DesignBuilder {
    fn new(line: usize, name: String, source: String) -> Self {
        Self {
            line,
            name,
            card_type: None,
            cost: 0,
            vp: 0,
            expansion: None,
            good: GoodType::None,
            flags: SmallVec::new(),
            powers: Vec::new(),
            bonuses: Vec::new(),
            source: vec![source],
        }
    }

    fn build(self, id: DesignId) -> Result<Design, CatalogError> {
        let (card_type, expansion) = match (self.card_type, self.expansion) {
            (Some(card_type), Some(expansion)) => (card_type, expansion),
            (None, _) => return Err(self.missing("type")),
            (_, None) => return Err(self.missing("expansion")),
        };
        Ok(Design {
            id,
            name: self.name,
            card_type,
            cost: self.cost,
            vp: self.vp,
            expansion,
            good: self.good,
            flags: self.flags,
            powers: self.powers,
            bonuses: self.bonuses,
            source: self.source,
        })
    }

    /// A required record never appeared; reported at the `N` line.
    fn missing(&self, field: &'static str) -> CatalogError {
        CatalogError::Parse {
            line: self.line,
            code: 'N',
            text: self.source.first().cloned().unwrap_or_default(),
            kind: ParseErrorKind::MissingField(field),
        }
    }

    fn apply(&mut self, code: char, body: &str) -> Result<(), ParseErrorKind> {
        match code {
            'T' => self.set_type(body),
            'E' => self.set_expansion(body),
            'F' => self.add_flags(body),
            'G' => self.set_good(body),
            'P' => self.add_powers(body),
            'V' => self.add_bonus(body),
            _ => Ok(()),
        }
    }

    fn set_type(&mut self, body: &str) -> Result<(), ParseErrorKind> {
        let parts: Vec<&str> = body.split(':').collect();
        let type_text = field(&parts, 0, "type")?;
        let type_code: u8 = number(type_text, "type")?;
        self.card_type = Some(
            CardType::from_code(type_code)
                .ok_or_else(|| ParseErrorKind::UnknownCardType(type_text.to_string()))?,
        );
        self.cost = number(field(&parts, 1, "cost")?, "cost")?;
        self.vp = number(field(&parts, 2, "vp")?, "vp")?;
        Ok(())
    }

    fn set_expansion(&mut self, body: &str) -> Result<(), ParseErrorKind> {
        let (_marker, membership) = body
            .split_once('@')
            .ok_or_else(|| ParseErrorKind::MalformedExpansion(body.to_string()))?;
        let (index, count) = membership
            .split_once(':')
            .ok_or_else(|| ParseErrorKind::MalformedExpansion(body.to_string()))?;
        self.expansion = Some(CardExpansion {
            index: number(index, "expansion index")?,
            count: number(count, "copy count")?,
        });
        Ok(())
    }

    fn add_flags(&mut self, body: &str) -> Result<(), ParseErrorKind> {
        for name in body.split('|').map(str::trim) {
            let flag =
                CardFlag::from_name(name).ok_or_else(|| ParseErrorKind::UnknownFlag(name.to_string()))?;
            self.flags.push(flag);
        }
        Ok(())
    }

    fn set_good(&mut self, body: &str) -> Result<(), ParseErrorKind> {
        let name = body.trim();
        self.good = GoodType::from_name(name).ok_or_else(|| ParseErrorKind::UnknownGood(name.to_string()))?;
        Ok(())
    }

    fn add_powers(&mut self, body: &str) -> Result<(), ParseErrorKind> {
        let (phase_text, clauses) = body
            .split_once(':')
            .ok_or(ParseErrorKind::MissingField("power"))?;
        let phase_text = phase_text.trim();
        let phase: u8 = number(phase_text, "phase")?;
        if !(1..=5).contains(&phase) {
            return Err(ParseErrorKind::PhaseOutOfRange(phase_text.to_string()));
        }

        // Clauses are all resolved before any is appended.
        let mut parsed: SmallVec<[Power; 4]> = SmallVec::new();
        for clause in clauses.split('|') {
            let fields: Vec<&str> = clause.split(':').map(str::trim).collect();
            let name = fields[0];
            if name.is_empty() || fields.len() > 3 {
                return Err(ParseErrorKind::MalformedPower(clause.trim().to_string()));
            }
            let code = PowerCode::resolve(phase, name).ok_or_else(|| ParseErrorKind::UnknownPower {
                phase,
                name: name.to_string(),
            })?;
            let mut power = Power::new(code);
            if let Some(value) = fields.get(1) {
                power.value = number(value, "power value")?;
            }
            if let Some(times) = fields.get(2) {
                power.times = number(times, "power times")?;
            }
            parsed.push(power);
        }
        self.powers.extend(parsed);
        Ok(())
    }

    fn add_bonus(&mut self, body: &str) -> Result<(), ParseErrorKind> {
        let parts: Vec<&str> = body.split(':').collect();
        let point = number(field(&parts, 0, "bonus point")?, "bonus point")?;
        let category_name = field(&parts, 1, "bonus category")?;
        let category = VpCategory::from_name(category_name)
            .ok_or_else(|| ParseErrorKind::UnknownVpCategory(category_name.to_string()))?;
        let name = field(&parts, 2, "bonus name")?.to_string();
        self.bonuses.push(Bonus { point, category, name });
        Ok(())
    }
}

fn field<'a>(parts: &[&'a str], index: usize, name: &'static str) -> Result<&'a str, ParseErrorKind> {
    parts
        .get(index)
        .map(|part| part.trim())
        .ok_or(ParseErrorKind::MissingField(name))
}

fn number<T: FromStr>(text: &str, field: &'static str) -> Result<T, ParseErrorKind> {
    let text = text.trim();
    text.parse().map_err(|_| ParseErrorKind::BadNumber {
        field,
        value: text.to_string(),
    })
}

/// Incremental catalog parser.
///
/// Feed it lines in order, then call `finish` for the designs.
///
/// ```
/// use rust_tableau::cards::CatalogParser;
///
/// let mut parser = CatalogParser::new();
/// parser.feed(1, "N:Alpha Colony").unwrap();
/// parser.feed(2, "T:1:2:1").unwrap();
/// parser.feed(3, "E:base@0:1").unwrap();
/// let designs = parser.finish().unwrap();
///
/// assert_eq!(designs.len(), 1);
/// assert_eq!(designs[0].cost, 2);
/// ```
#[derive(Debug, Default)]
pub struct CatalogParser {
    designs: Vec<Design>,
    current: Option<DesignBuilder>,
}

impl CatalogParser {
    /// Create an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Designs committed so far.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.designs.len()
    }

    /// Interpret one line. `line_no` is only used for error reports.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the record is malformed, names an
    /// unknown symbol, or appears before the first `N` record.
    pub fn feed(&mut self, line_no: usize, line: &str) -> Result<(), CatalogError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(code) = line.chars().next() else {
            return Ok(());
        };
        let body = line.get(1..).unwrap_or("").strip_prefix(':');
        let parse_error = |kind| CatalogError::Parse {
            line: line_no,
            code,
            text: line.trim().to_string(),
            kind,
        };

        match code {
            'N' => {
                let name = body.map(str::trim).unwrap_or("");
                if name.is_empty() {
                    return Err(parse_error(ParseErrorKind::MissingField("name")));
                }
                self.commit()?;
                self.current = Some(DesignBuilder::new(line_no, name.to_string(), line.trim().to_string()));
                Ok(())
            }
            'T' | 'E' | 'F' | 'G' | 'P' | 'V' => {
                let builder = self
                    .current
                    .as_mut()
                    .ok_or_else(|| parse_error(ParseErrorKind::NoCurrentDesign))?;
                let body = body.ok_or_else(|| parse_error(ParseErrorKind::MissingField("body")))?;
                builder.apply(code, body).map_err(parse_error)?;
                builder.source.push(line.trim().to_string());
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Commit the design in progress and return every design parsed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the last design has no `T` or `E`
    /// record.
    pub fn finish(mut self) -> Result<Vec<Design>, CatalogError> {
        self.commit()?;
        Ok(self.designs)
    }

    fn commit(&mut self) -> Result<(), CatalogError> {
        if let Some(builder) = self.current.take() {
            let id = DesignId::new(self.designs.len() as u32);
            self.designs.push(builder.build(id)?);
        }
        Ok(())
    }
}

/// Parse a whole catalog text.
///
/// # Errors
///
/// Returns the first `CatalogError::Parse` encountered.
pub fn parse_designs(text: &str) -> Result<Vec<Design>, CatalogError> {
    let mut parser = CatalogParser::new();
    for (index, line) in text.lines().enumerate() {
        parser.feed(index + 1, line)?;
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ConsumePower, ProducePower, SettlePower};
    use crate::core::Phase;

    fn kind_of(result: Result<Vec<Design>, CatalogError>) -> (usize, ParseErrorKind) {
        match result {
            Err(CatalogError::Parse { line, kind, .. }) => (line, kind),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_gene_mill() {
        let designs = parse_designs("N:Gene Mill\nT:2:3:1\nE:base@0:2\nG:GENE\n").unwrap();

        assert_eq!(designs.len(), 1);
        let mill = &designs[0];
        assert_eq!(mill.name, "Gene Mill");
        assert_eq!(mill.card_type, CardType::Development);
        assert_eq!(mill.cost, 3);
        assert_eq!(mill.vp, 1);
        assert_eq!(mill.good, GoodType::Gene);
        assert_eq!(mill.source, vec!["N:Gene Mill", "T:2:3:1", "G:GENE"]);
    }

    #[test]
    fn test_full_record_set() {
        let text = "\
# a comment
N:Alien Rosetta Stone World
T:1:3:2
E:base@1:2
F:ALIEN|WINDFALL
G:ALIEN
P:3:REDUCE:1:0|NOVELTY:0:0
P:4:CONSUME_ANY:2:1
P:5:WINDFALL_ALIEN
V:2:ALIEN_FLAG:
V:3:NAME:Galactic Federation
";
        let designs = parse_designs(text).unwrap();
        let world = &designs[0];

        assert_eq!(world.expansion, CardExpansion { index: 1, count: 2 });
        assert!(world.has_flag(CardFlag::Alien));
        assert!(world.has_flag(CardFlag::Windfall));
        assert_eq!(world.powers.len(), 4);
        assert_eq!(world.powers[0].code, PowerCode::Settle(SettlePower::Reduce));
        assert_eq!(world.powers[0].value, 1);
        assert_eq!(world.powers[2].code, PowerCode::Consume(ConsumePower::ConsumeAny));
        assert_eq!((world.powers[2].value, world.powers[2].times), (2, 1));
        assert_eq!(world.powers[3].code, PowerCode::Produce(ProducePower::WindfallAlien));
        assert!(world.powers.iter().all(|p| p.phase().has_powers()));
        assert_eq!(world.powers_in(Phase::Settle).count(), 2);
        assert_eq!(world.bonuses.len(), 2);
        assert_eq!(world.bonuses[0].name, "");
        assert_eq!(world.bonuses[1].category, VpCategory::Name);
        assert_eq!(world.bonuses[1].name, "Galactic Federation");
        // comment not retained
        assert_eq!(world.source.len(), 10);
    }

    #[test]
    fn test_ids_follow_commit_order() {
        let designs = parse_designs("N:A\nT:1:0:0\nE:base@0:1\nN:B\nT:2:1:1\nE:base@0:1\nN:C\nT:1:1:1\nE:base@0:1\n").unwrap();
        let ids: Vec<u32> = designs.iter().map(|d| d.id.raw()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_power_with_value_only() {
        let designs = parse_designs("N:A\nT:2:1:1\nE:base@0:1\nP:2:DRAW:1\n").unwrap();
        assert_eq!(designs[0].powers[0].value, 1);
        assert_eq!(designs[0].powers[0].times, 0);
    }

    #[test]
    fn test_unknown_lines_and_blanks_are_skipped() {
        let designs = parse_designs("\nX:whatever\nN:A\n\nT:1:0:0\n Z\nE:base@0:1\n").unwrap();
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].source, vec!["N:A", "T:1:0:0", "E:base@0:1"]);
    }

    #[test]
    fn test_field_before_design_fails() {
        let (line, kind) = kind_of(parse_designs("# header\nT:1:0:0\n"));
        assert_eq!(line, 2);
        assert_eq!(kind, ParseErrorKind::NoCurrentDesign);
    }

    #[test]
    fn test_phase_out_of_range_fails() {
        let (line, kind) = kind_of(parse_designs("N:A\nT:1:0:0\nP:6:DRAW\n"));
        assert_eq!(line, 3);
        assert_eq!(kind, ParseErrorKind::PhaseOutOfRange("6".to_string()));
    }

    #[test]
    fn test_power_from_wrong_phase_fails() {
        let (_, kind) = kind_of(parse_designs("N:A\nT:1:0:0\nP:1:TRADE_ANY\n"));
        assert_eq!(
            kind,
            ParseErrorKind::UnknownPower {
                phase: 1,
                name: "TRADE_ANY".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_power_clause_fails() {
        let (_, kind) = kind_of(parse_designs("N:A\nT:1:0:0\nP:2:DRAW:1:1:1\n"));
        assert!(matches!(kind, ParseErrorKind::MalformedPower(_)));
    }

    #[test]
    fn test_unknown_symbols_fail() {
        let (_, kind) = kind_of(parse_designs("N:A\nT:1:0:0\nF:SHINY\n"));
        assert_eq!(kind, ParseErrorKind::UnknownFlag("SHINY".to_string()));

        let (_, kind) = kind_of(parse_designs("N:A\nT:1:0:0\nG:SPICE\n"));
        assert_eq!(kind, ParseErrorKind::UnknownGood("SPICE".to_string()));

        let (_, kind) = kind_of(parse_designs("N:A\nT:1:0:0\nV:1:SHINY:\n"));
        assert_eq!(kind, ParseErrorKind::UnknownVpCategory("SHINY".to_string()));

        let (_, kind) = kind_of(parse_designs("N:A\nT:3:0:0\n"));
        assert_eq!(kind, ParseErrorKind::UnknownCardType("3".to_string()));
    }

    #[test]
    fn test_bad_numbers_fail() {
        let (_, kind) = kind_of(parse_designs("N:A\nT:1:x:0\n"));
        assert_eq!(
            kind,
            ParseErrorKind::BadNumber {
                field: "cost",
                value: "x".to_string()
            }
        );

        let (_, kind) = kind_of(parse_designs("N:A\nT:1:0\n"));
        assert_eq!(kind, ParseErrorKind::MissingField("vp"));

        let (_, kind) = kind_of(parse_designs("N:A\nT:1:0:0\nE:base:0:1\n"));
        assert!(matches!(kind, ParseErrorKind::MalformedExpansion(_)));
    }

    #[test]
    fn test_design_without_type_fails_at_its_name() {
        let (line, kind) = kind_of(parse_designs("N:A\nG:GENE\nN:B\nT:1:0:0\n"));
        assert_eq!(line, 1);
        assert_eq!(kind, ParseErrorKind::MissingField("type"));
    }

    #[test]
    fn test_design_without_membership_is_rejected() {
        let (line, kind) = kind_of(parse_designs("N:No Membership\nT:1:1:1\n"));
        assert_eq!(line, 1);
        assert_eq!(kind, ParseErrorKind::MissingField("expansion"));

        // Reported when the next design starts, not silently given one copy.
        let (line, kind) = kind_of(parse_designs("N:A\nT:1:0:0\nE:base@0:1\nN:B\nT:1:0:0\nN:C\n"));
        assert_eq!(line, 4);
        assert_eq!(kind, ParseErrorKind::MissingField("expansion"));
    }

    #[test]
    fn test_error_message_names_line_and_code() {
        let err = parse_designs("N:A\nT:1:0:0\nF:SHINY\n").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("line 3: bad F record"));
        assert!(message.contains("SHINY"));
    }
}
