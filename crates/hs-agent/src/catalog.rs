//! Directive catalog: the four response kinds the router can choose.
//!
//! Each directive carries a one-sentence description, which goes into the
//! system prompt so the classifier can choose, and a generation template,
//! which is sent after the choice to elicit the concrete payload.

use hs_protocol::{DirectiveKind, DirectiveTemplate};

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveSpec {
    pub kind: DirectiveKind,
    pub description: &'static str,
    pub template: DirectiveTemplate,
}

impl DirectiveSpec {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

const QUERY_DESCRIPTION: &str = "Look up the state of devices in the home, for example to list device ids or read a sensor's temperature. Prefer FOLLOWUP when it is unclear which device is meant.";

const QUERY_TEMPLATE: DirectiveTemplate = DirectiveTemplate::new(
    "You write Jinja2 templates that Home Assistant renders to answer questions about the home.
Useful patterns:
{{ area_entities('kitchen') }}  (entities in one room; use it to find a device name)
{{ states('sensor.outdoor_temperature') }}  (state of one entity)
{{ states.light | map(attribute='entity_id') | list }}  (every light)
{{ label_entities('temperature') }}  (entities carrying a label)
{{ now() > today_at('22:15') }}  (time checks)
Prefer broad listings to aggressive filtering.
Task:
{input}
Output only the template. Do not add any explanation.",
);

const FOLLOWUP_DESCRIPTION: &str = "Ask the user a short clarifying question when the request is ambiguous, such as 'turn off the bedroom light' or 'turn off my computers', or when several entities could match.";

const FOLLOWUP_TEMPLATE: DirectiveTemplate = DirectiveTemplate::new(
    "Ask one brief follow-up question, between 2 and 10 words, to pin down this home automation request: {input}",
);

const ANSWER_DESCRIPTION: &str =
    "Answer the user directly when they asked about something and the conversation already holds the answer.";

const ANSWER_TEMPLATE: DirectiveTemplate = DirectiveTemplate::new(
    "The user said: {input}
Reply with the information already available in this conversation.",
);

const ACTION_DESCRIPTION: &str = "Turn something on or off through intent calls, only when the request is clear and names the exact device or room.";

const ACTION_TEMPLATE: DirectiveTemplate = DirectiveTemplate::new(
    r#"You write Home Assistant intent calls as JSON.
Intents:
HassTurnOn turns on a device, an entity, or every device in an area.
HassTurnOff turns off a device, an entity, or every device in an area.
Slots: name (entity name), area, device_class.
A whole room: {"name": "HassTurnOn", "data": {"area": "kitchen"}}
A single entity: {"name": "HassTurnOff", "data": {"name": "desk lamp"}}
Several entities: {"name": "HassTurnOn", "data": {"name": "lamp 1"}}*{"name": "HassTurnOn", "data": {"name": "lamp 2"}}
Task:
{input}
Each call targets exactly one entity or area. To make several calls (no more than three), separate them with an asterisk *.
Output only the calls. Do not add any explanation. Ignore scenes."#,
);

/// Fixed registry of the four directives.
#[derive(Debug, Clone)]
pub struct DirectiveCatalog {
    specs: [DirectiveSpec; 4],
}

impl DirectiveCatalog {
    /// The built-in directives, in prompt order.
    pub fn standard() -> Self {
        Self {
            specs: [
                DirectiveSpec {
                    kind: DirectiveKind::Query,
                    description: QUERY_DESCRIPTION,
                    template: QUERY_TEMPLATE,
                },
                DirectiveSpec {
                    kind: DirectiveKind::Followup,
                    description: FOLLOWUP_DESCRIPTION,
                    template: FOLLOWUP_TEMPLATE,
                },
                DirectiveSpec {
                    kind: DirectiveKind::Answer,
                    description: ANSWER_DESCRIPTION,
                    template: ANSWER_TEMPLATE,
                },
                DirectiveSpec {
                    kind: DirectiveKind::Action,
                    description: ACTION_DESCRIPTION,
                    template: ACTION_TEMPLATE,
                },
            ],
        }
    }

    pub fn get(&self, kind: DirectiveKind) -> &DirectiveSpec {
        let idx = match kind {
            DirectiveKind::Query => 0,
            DirectiveKind::Followup => 1,
            DirectiveKind::Answer => 2,
            DirectiveKind::Action => 3,
        };
        &self.specs[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectiveSpec> {
        self.specs.iter()
    }
}

impl Default for DirectiveCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
