//! Line-based interactive provider.
//!
//! Writes each choice as a numbered list and reads the answer as
//! comma-separated indices from any `BufRead`. Works over stdin/stdout as
//! well as in-memory buffers.

use std::io::{BufRead, Write};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::choice::{Answer, Choice, ChoiceKind};
use super::error::ProtocolError;
use super::provider::DecisionProvider;
use crate::cards::CardId;
use crate::core::{GameAction, Phase, PlayerId};

/// What a posed choice needs to turn typed indices into an answer.
#[derive(Clone, Debug)]
struct Prompt {
    kind: ChoiceKind,
    actions: Vec<GameAction>,
    cards: Vec<CardId>,
    powers: usize,
}

/// Provider that asks a person.
#[derive(Debug)]
pub struct InteractiveDecision<R, W> {
    input: R,
    output: W,
    pending: FxHashMap<PlayerId, Prompt>,
}

impl<R: BufRead, W: Write> InteractiveDecision<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: FxHashMap::default(),
        }
    }

    /// Give back the reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn read_line(&mut self) -> Result<String, ProtocolError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ProtocolError::Io(std::io::ErrorKind::UnexpectedEof.into()));
        }
        Ok(line.trim().to_string())
    }
}

fn parse_indices(line: &str, len: usize) -> Result<Vec<usize>, ProtocolError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    line.split(',')
        .map(|token| {
            let token = token.trim();
            match token.parse::<usize>() {
                Ok(index) if index < len => Ok(index),
                _ => Err(ProtocolError::Input(format!("{token:?} is not one of 0..{len}"))),
            }
        })
        .collect()
}

fn interpret(prompt: &Prompt, line: &str) -> Result<Answer, ProtocolError> {
    match prompt.kind {
        ChoiceKind::Action => {
            let picked: SmallVec<[GameAction; 2]> = parse_indices(line, prompt.actions.len())?
                .into_iter()
                .map(|index| prompt.actions[index])
                .collect();
            Ok(Answer::Actions(picked))
        }
        ChoiceKind::Lucky => line
            .parse::<u8>()
            .map(Answer::Number)
            .map_err(|_| ProtocolError::Input(format!("{line:?} is not a number"))),
        ChoiceKind::Settle | ChoiceKind::Consume | ChoiceKind::Produce => {
            let picked = parse_indices(line, prompt.powers)?;
            match picked.as_slice() {
                [] => Ok(Answer::Power(None)),
                [index] => Ok(Answer::Power(Some(*index))),
                _ => Err(ProtocolError::Input("choose a single power".to_string())),
            }
        }
        _ => Ok(Answer::Cards(
            parse_indices(line, prompt.cards.len())?
                .into_iter()
                .map(|index| prompt.cards[index])
                .collect(),
        )),
    }
}

fn instruction(choice: &Choice<'_>) -> String {
    match choice {
        Choice::Action { count: 1, .. } => "Choose an action: ".to_string(),
        Choice::Action { count, .. } => format!("Choose {count} actions (use , for more): "),
        Choice::Start { .. } => "Choose a start world: ".to_string(),
        Choice::Discard { count, .. } => format!("Choose {count} cards to discard (use , for more): "),
        Choice::Place { phase, .. } => format!("Choose a card to {phase} (empty to pass): "),
        Choice::Payment { placing, cost, .. } => {
            format!("Discard {cost} cards to pay for {}: ", placing.design.name)
        }
        Choice::Trade { .. } => "Choose a good to trade (empty to pass): ".to_string(),
        Choice::Consume { optional: true, .. } => "Choose a consume power (empty to stop): ".to_string(),
        Choice::Consume { .. } => "Choose a consume power: ".to_string(),
        Choice::ConsumeHand { max, .. } => format!("Discard up to {max} cards from hand: "),
        Choice::Good { min, max, .. } => format!("Choose {min} to {max} goods to consume: "),
        Choice::Lucky => "Choose a number from 1 to 7: ".to_string(),
        Choice::Windfall { .. } => "Choose a windfall world (empty to pass): ".to_string(),
        Choice::Settle { .. } | Choice::Produce { .. } => "Choose a power (empty for none): ".to_string(),
    }
}

impl<R: BufRead, W: Write> DecisionProvider for InteractiveDecision<R, W> {
    fn init(&mut self, who: PlayerId, name: &str) -> Result<(), ProtocolError> {
        writeln!(self.output, "{who} is {name}")?;
        Ok(())
    }

    fn notify_rotation(&mut self, who: PlayerId) -> Result<(), ProtocolError> {
        writeln!(self.output, "seats rotated, now {who}")?;
        Ok(())
    }

    fn prepare_phase(&mut self, who: PlayerId, phase: Phase) -> Result<(), ProtocolError> {
        writeln!(self.output, "{who}: {phase} phase")?;
        Ok(())
    }

    fn make_choice(&mut self, who: PlayerId, choice: &Choice<'_>) -> Result<(), ProtocolError> {
        let mut prompt = Prompt {
            kind: choice.kind(),
            actions: Vec::new(),
            cards: Vec::new(),
            powers: choice.powers().len(),
        };

        writeln!(self.output, "{who}: {}", prompt.kind)?;
        if let Choice::Action { actions, .. } = choice {
            for (index, action) in actions.iter().enumerate() {
                writeln!(self.output, "  [{index}] {action}")?;
            }
            prompt.actions = actions.to_vec();
        }
        for (index, candidate) in choice.cards().iter().enumerate() {
            let design = candidate.design;
            writeln!(
                self.output,
                "  [{index}] {} (cost {}, {} VP)",
                design.name, design.cost, design.vp
            )?;
            prompt.cards.push(candidate.id);
        }
        for (index, candidate) in choice.powers().iter().enumerate() {
            writeln!(
                self.output,
                "  [{index}] {} on {}",
                candidate.power.code, candidate.source.design.name
            )?;
        }
        write!(self.output, "{}", instruction(choice))?;
        self.output.flush()?;

        self.pending.insert(who, prompt);
        Ok(())
    }

    fn wait_answer(&mut self, who: PlayerId) -> Result<Answer, ProtocolError> {
        let prompt = self.pending.remove(&who).ok_or(ProtocolError::NoPendingAnswer(who))?;
        loop {
            let line = self.read_line()?;
            match interpret(&prompt, &line) {
                Ok(answer) => return Ok(answer),
                Err(ProtocolError::Input(message)) => {
                    write!(self.output, "{message}, try again: ")?;
                    self.output.flush()?;
                }
                Err(other) => return Err(other),
            }
        }
    }

    fn explore_sample(&mut self, who: PlayerId, draw: usize, keep: usize, discard: usize) -> Result<(), ProtocolError> {
        writeln!(self.output, "{who}: explored {draw}, keep {keep}, discard {discard}")?;
        Ok(())
    }

    fn game_over(&mut self, who: PlayerId) -> Result<(), ProtocolError> {
        writeln!(self.output, "{who}: game over")?;
        Ok(())
    }

    fn private_message(&mut self, who: PlayerId, message: &str) -> Result<(), ProtocolError> {
        writeln!(self.output, "{who}: {message}")?;
        Ok(())
    }
}
