use std::path::PathBuf;

use rand::seq::SliceRandom;

pub const TRIGGER_DEFAULT_LABEL: &str = "🚀 Generate image";
pub const TRIGGER_LOADING_LABEL: &str = "Generating...";
pub const LOADING_PLACEHOLDER: &str = "🎨 Creating your image... This can take a few seconds...";
pub const ERROR_PLACEHOLDER: &str = "❌ Failed to generate the image";

/// Prompt suggestions surfaced on double-click.
pub const EXAMPLE_PROMPTS: [&str; 5] = [
    "A floating castle in the clouds at sunset, epic fantasy style, vibrant colors",
    "Portrait of a cyberpunk robot with glowing eyes, futuristic style, neon, 8k",
    "A magical forest with bioluminescent mushrooms, mysterious atmosphere, moonlight",
    "An underwater city with art nouveau architecture, sunbeams piercing the water",
    "A crystal dragon in a diamond cave, prismatic reflections, ultra detailed",
];

/// The form fields the generation flow reads at call time. Width, height and
/// steps come from constrained numeric inputs; the seed stays raw text so an
/// empty or malformed value can be handled explicitly.
#[derive(Debug, Clone)]
pub struct FormFields {
    pub token: String,
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub seed: String,
    pub pulse: bool,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            token: String::new(),
            prompt: String::new(),
            width: 1024,
            height: 1024,
            steps: 4,
            seed: String::new(),
            pulse: false,
        }
    }
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the prompt with one of the fixed examples and mark the brief
    /// visual pulse on the field.
    pub fn fill_example_prompt(&mut self) {
        let mut rng = rand::thread_rng();
        if let Some(example) = EXAMPLE_PROMPTS.choose(&mut rng) {
            self.prompt = (*example).to_string();
            self.pulse = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    pub label: String,
    pub enabled: bool,
}

impl TriggerControl {
    pub fn idle() -> Self {
        Self {
            label: TRIGGER_DEFAULT_LABEL.to_string(),
            enabled: true,
        }
    }

    pub fn loading() -> Self {
        Self {
            label: TRIGGER_LOADING_LABEL.to_string(),
            enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub path: PathBuf,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRegion {
    Empty,
    Loading,
    Image { source: String, download: Download },
    Error,
}

impl ImageRegion {
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            ImageRegion::Loading => Some(LOADING_PLACEHOLDER),
            ImageRegion::Error => Some(ERROR_PLACEHOLDER),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    TokenField,
    PromptField,
    TriggerButton,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    DoubleClick,
    Change,
    KeyCtrlEnter,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TriggerGeneration,
    FillExamplePrompt,
    PersistToken,
    LoadSavedToken,
}

/// The full event-wiring surface as one auditable table.
pub fn event_bindings() -> Vec<(ElementId, EventKind, Action)> {
    vec![
        (
            ElementId::TriggerButton,
            EventKind::Click,
            Action::TriggerGeneration,
        ),
        (
            ElementId::PromptField,
            EventKind::KeyCtrlEnter,
            Action::TriggerGeneration,
        ),
        (
            ElementId::PromptField,
            EventKind::DoubleClick,
            Action::FillExamplePrompt,
        ),
        (ElementId::TokenField, EventKind::Change, Action::PersistToken),
        (ElementId::Window, EventKind::Load, Action::LoadSavedToken),
    ]
}

pub fn dispatch(element: ElementId, event: EventKind) -> Option<Action> {
    event_bindings()
        .into_iter()
        .find(|(bound_element, bound_event, _)| *bound_element == element && *bound_event == event)
        .map(|(_, _, action)| action)
}
