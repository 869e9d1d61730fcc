/// Greeting keywords, compared case-insensitively against each word.
pub const GREETING_KEYWORDS: [&str; 3] = ["hola", "buenas", "saludos"];

/// Literal menu selections.
pub const MENU_OPTIONS: [&str; 3] = ["1", "2", "3"];

/// Which handler an inbound message goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Greeting,
    MenuOption,
    FreeForm,
}

/// Evaluation order, first match wins. `FreeForm` matches everything and
/// must stay last.
pub const TRIGGERS: [Trigger; 3] = [Trigger::Greeting, Trigger::MenuOption, Trigger::FreeForm];

impl Trigger {
    pub fn matches(self, body: &str) -> bool {
        match self {
            Trigger::Greeting => is_greeting(body),
            Trigger::MenuOption => is_menu_option(body),
            Trigger::FreeForm => true,
        }
    }
}

/// Picks exactly one trigger for the message body.
pub fn route(body: &str) -> Trigger {
    TRIGGERS
        .into_iter()
        .find(|trigger| trigger.matches(body))
        .unwrap_or(Trigger::FreeForm)
}

fn is_greeting(body: &str) -> bool {
    body.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| {
            let word = word.to_lowercase();
            GREETING_KEYWORDS.contains(&word.as_str())
        })
}

pub fn is_menu_option(body: &str) -> bool {
    MENU_OPTIONS.contains(&body.trim())
}
