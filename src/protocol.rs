//! Showdown-protocol text log of a battle, used for replays and the spectator stream.

use crate::battle::Side;

#[derive(Clone, Debug, Default)]
pub struct ProtocolLog {
    lines: Vec<String>,
}

pub fn ident(side: Side, name: &str) -> String {
    format!("{}a: {name}", side.slot())
}

impl ProtocolLog {
    pub fn new(tag: &str, format_id: &str) -> Self {
        let mut log = Self::default();
        log.push(format!("|init|battle|{tag}"));
        log.push("|gametype|singles".to_string());
        log.push(format!("|tier|{format_id}"));
        log.push("|start".to_string());
        log
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn player(&mut self, side: Side, name: &str) {
        self.push(format!("|player|{}|{name}", side.slot()));
    }

    pub fn turn(&mut self, turn: u32) {
        self.push(format!("|turn|{turn}"));
    }

    pub fn switch(&mut self, side: Side, name: &str, hp: i32, max_hp: u32) {
        self.push(format!("|switch|{}|{name}|{}/{max_hp}", ident(side, name), hp.max(0)));
    }

    pub fn action(&mut self, side: Side, name: &str, move_name: &str, target: &str) {
        self.push(format!("|move|{}|{move_name}|{target}", ident(side, name)));
    }

    pub fn miss(&mut self, side: Side, name: &str) {
        self.push(format!("|-miss|{}", ident(side, name)));
    }

    pub fn cant(&mut self, side: Side, name: &str, reason: &str) {
        self.push(format!("|cant|{}|{reason}", ident(side, name)));
    }

    pub fn damage(&mut self, side: Side, name: &str, hp: i32, max_hp: u32) {
        self.push(format!("|-damage|{}|{}/{max_hp}", ident(side, name), hp.max(0)));
    }

    pub fn effectiveness(&mut self, side: Side, name: &str, multiplier: f32) {
        let tag = if multiplier == 0.0 {
            "-immune"
        } else if multiplier > 1.0 {
            "-supereffective"
        } else if multiplier < 1.0 {
            "-resisted"
        } else {
            return;
        };
        self.push(format!("|{tag}|{}", ident(side, name)));
    }

    pub fn status(&mut self, side: Side, name: &str, code: &str) {
        self.push(format!("|-status|{}|{}", ident(side, name), code.to_ascii_lowercase()));
    }

    pub fn cure(&mut self, side: Side, name: &str, code: &str) {
        self.push(format!("|-curestatus|{}|{}", ident(side, name), code.to_ascii_lowercase()));
    }

    pub fn weather(&mut self, name: &str) {
        self.push(format!("|-weather|{name}"));
    }

    pub fn field_start(&mut self, name: &str) {
        self.push(format!("|-fieldstart|{name}"));
    }

    pub fn field_end(&mut self, name: &str) {
        self.push(format!("|-fieldend|{name}"));
    }

    pub fn side_start(&mut self, side: Side, name: &str) {
        self.push(format!("|-sidestart|{}|{name}", side.slot()));
    }

    pub fn side_end(&mut self, side: Side, name: &str) {
        self.push(format!("|-sideend|{}|{name}", side.slot()));
    }

    pub fn faint(&mut self, side: Side, name: &str) {
        self.push(format!("|faint|{}", ident(side, name)));
    }

    pub fn win(&mut self, winner: &str) {
        self.push(format!("|win|{winner}"));
    }

    pub fn tie(&mut self) {
        self.push("|tie".to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
