use wasm_bindgen::prelude::*;
use glossa_notation::{parse_document, NotationError};
use glossa_protocol::{Derivation, DeterminerSlot};
use glossa_realizer::log::project_all;
use glossa_realizer::{diff_all, Lexicon, LexiconError, LogEntry, Realizer, RenderConfig, StepChange};
use glossa_solver::parse_selection;
use serde::Serialize;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The structured response sent back to the editor after each render.
#[derive(Debug, Serialize)]
pub struct RenderReport {
    pub sentences: Vec<String>,
    pub log: Vec<LogEntry>,
    /// Per sentence, how its steps compare with the previous render.
    pub diff: Vec<Vec<StepChange>>,
    pub derivations: Vec<Derivation>,
}

#[derive(Debug, Serialize)]
pub struct OptionView {
    pub value: &'static str,
    pub enabled: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoticeView {
    pub slot: &'static str,
    pub value: &'static str,
    pub reason: String,
}

/// Render state kept between edits: the lexicon and the last derivations,
/// so every report can carry a diff against the one before it.
pub struct Session {
    lexicon: Lexicon,
    config: RenderConfig,
    previous: Vec<Derivation>,
}

impl Session {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon, config: RenderConfig::default(), previous: Vec::new() }
    }

    /// Empty bytes select the built-in lexicon.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LexiconError> {
        let lexicon = if data.is_empty() { Lexicon::builtin()? } else { Lexicon::from_archive(data)? };
        Ok(Self::new(lexicon))
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn render(&mut self, notation: &str) -> Result<RenderReport, NotationError> {
        let sentences = parse_document(notation)?;
        let realizer = Realizer::with_config(&self.lexicon, self.config.clone());
        let rendered = realizer.render_all(&sentences);

        let derivations: Vec<Derivation> = rendered.iter().map(|r| r.derivation.clone()).collect();
        let report = RenderReport {
            sentences: rendered.into_iter().map(|r| r.text).collect(),
            log: project_all(&derivations),
            diff: diff_all(&derivations, &self.previous),
            derivations: derivations.clone(),
        };
        self.previous = derivations;
        Ok(report)
    }

    /// Forgets the last render; the next report diffs against nothing.
    pub fn reset(&mut self) {
        self.previous.clear();
    }
}

/// The engine instance running in the browser.
#[wasm_bindgen]
pub struct GlossaEngine {
    session: Session,
}

#[wasm_bindgen]
impl GlossaEngine {
    /// `data` is a compiled lexicon archive (loaded via fetch() in JS), or
    /// empty for the built-in one.
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<GlossaEngine, JsValue> {
        let session = Session::from_bytes(&data).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { session })
    }

    pub fn configure(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config = RenderConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.set_config(config);
        Ok(())
    }

    pub fn render(&mut self, notation: &str) -> Result<JsValue, JsValue> {
        let report = self.session.render(notation).map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&report).map_err(JsValue::from)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}

/// Determiner dropdowns of one noun phrase. The caller passes the clock.
#[wasm_bindgen]
pub struct DeterminerEditor {
    inner: glossa_solver::DeterminerEditor,
}

#[wasm_bindgen]
impl DeterminerEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DeterminerEditor {
        Self { inner: glossa_solver::DeterminerEditor::new() }
    }

    pub fn options(&self, slot: &str) -> Result<JsValue, JsValue> {
        let slot = DeterminerSlot::parse(slot).ok_or_else(|| JsValue::from_str(&format!("unknown determiner slot '{}'", slot)))?;
        serde_wasm_bindgen::to_value(&option_views(&self.inner, slot)).map_err(JsValue::from)
    }

    /// Returns whether the value was committed; an empty value clears the slot.
    pub fn commit(&mut self, slot: &str, value: &str, now_ms: f64) -> Result<bool, JsValue> {
        let (slot, value) = parse_selection(slot, value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.inner.commit(slot, value, now_ms as u64))
    }

    pub fn notices(&mut self, now_ms: f64) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&notice_views(&mut self.inner, now_ms as u64)).map_err(JsValue::from)
    }

    /// The committed values, outermost slot first.
    pub fn selections(&self) -> Vec<JsValue> {
        self.inner.selections().iter().map(|d| JsValue::from_str(d.as_str())).collect()
    }
}

impl Default for DeterminerEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn option_views(editor: &glossa_solver::DeterminerEditor, slot: DeterminerSlot) -> Vec<OptionView> {
    editor
        .options(slot)
        .into_iter()
        .map(|o| OptionView { value: o.value.as_str(), enabled: o.enabled, reason: o.reason })
        .collect()
}

fn notice_views(editor: &mut glossa_solver::DeterminerEditor, now_ms: u64) -> Vec<NoticeView> {
    editor
        .notices(now_ms)
        .iter()
        .map(|n| NoticeView { slot: n.slot.as_str(), value: n.value.as_str(), reason: n.reason.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::Determiner;
    use glossa_realizer::ChangeKind;
    use glossa_solver::NOTICE_TTL_MS;

    #[test]
    fn test_session_diffs_against_previous_render() {
        let mut session = Session::from_bytes(&[]).unwrap();

        let first = session.render("declarative(clause(present, eat(agent:pron(he), patient:np(apple, the))))").unwrap();
        assert_eq!(first.sentences, vec!["He eats the apple."]);
        assert!(first.diff[0].iter().all(|c| c.kind == ChangeKind::Added));
        assert!(!first.log.is_empty());

        let second = session.render("declarative(clause(past, eat(agent:pron(he), patient:np(apple, the))))").unwrap();
        assert_eq!(second.sentences, vec!["He ate the apple."]);
        assert!(second.diff[0].iter().any(|c| c.kind == ChangeKind::Unchanged));
        assert!(second.diff[0].iter().any(|c| c.kind != ChangeKind::Unchanged));

        session.reset();
        let third = session.render("declarative(clause(past, eat(agent:pron(he), patient:np(apple, the))))").unwrap();
        assert!(third.diff[0].iter().all(|c| c.kind == ChangeKind::Added));
    }

    #[test]
    fn test_bad_notation_keeps_previous() {
        let mut session = Session::from_bytes(&[]).unwrap();
        session.render("declarative(clause(present, sleep(agent:pron(she))))").unwrap();
        assert!(session.render("declarative(").is_err());

        let again = session.render("declarative(clause(present, sleep(agent:pron(she))))").unwrap();
        assert!(again.diff[0].iter().all(|c| c.kind == ChangeKind::Unchanged));
    }

    #[test]
    fn test_bad_archive_is_rejected() {
        assert!(Session::from_bytes(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_editor_views() {
        let mut editor = glossa_solver::DeterminerEditor::new();
        editor.commit(DeterminerSlot::Central, Some(Determiner::The), 0);

        let options = option_views(&editor, DeterminerSlot::Pre);
        assert!(options.iter().any(|o| o.value == "all" && o.enabled));

        let options = option_views(&editor, DeterminerSlot::Number);
        assert!(options.iter().any(|o| o.value == "plural" && o.enabled));

        // "a" then "two": the post value wins over nothing, the article stays
        editor.commit(DeterminerSlot::Central, Some(Determiner::A), 5);
        assert!(!editor.commit(DeterminerSlot::Post, Some(Determiner::Two), 6));
        assert!(notice_views(&mut editor, 10).is_empty());

        // Switching the article clears a clashing post value with a notice
        editor.commit(DeterminerSlot::Central, Some(Determiner::The), 20);
        editor.commit(DeterminerSlot::Post, Some(Determiner::Two), 21);
        editor.commit(DeterminerSlot::Central, Some(Determiner::A), 22);
        let notices = notice_views(&mut editor, 30);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].value, "two");
        assert!(notice_views(&mut editor, 22 + NOTICE_TTL_MS).is_empty());
    }
}
