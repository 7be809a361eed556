//! Pure rendering: (data, view state) -> `Node` tree. No I/O here; the
//! console front-end turns the tree into text.

use crate::{
    database::DataStore,
    models::{Institution, Member, SessionIdentity},
    services::{
        InstitutionBrowser, IntakeForm, MemberSearch, SelectOption, ViewRouter, TABS,
        TAB_ADD_MEMBER, TAB_INSTITUTIONS, TAB_MEMBER_LOOKUP,
    },
    utils::text::or_placeholder,
};

pub const NO_INSTITUTION_MEMBERS: &str = "No members found for this institution.";
pub const NO_SEARCH_MATCHES: &str = "No members found.";

pub const MEMBER_COLUMNS: [&str; 6] = [
    "Full Name",
    "National ID",
    "Job Title",
    "Grade",
    "Status",
    "Position",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Error,
    Success,
    Muted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabControl {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Panel {
        id: &'static str,
        hidden: bool,
        children: Vec<Node>,
    },
    Text(String),
    Field {
        label: &'static str,
        value: String,
    },
    Input {
        id: String,
        value: String,
    },
    Select {
        id: &'static str,
        options: Vec<SelectOption>,
        selected: String,
    },
    Tabs(Vec<TabControl>),
    Table {
        headers: Vec<&'static str>,
        rows: Vec<Vec<String>>,
    },
    Notice {
        tone: Tone,
        text: String,
    },
}

impl Node {
    fn panel(id: &'static str, hidden: bool, children: Vec<Node>) -> Self {
        Node::Panel { id, hidden, children }
    }

    fn notice(tone: Tone, text: &str) -> Self {
        Node::Notice {
            tone,
            text: text.to_string(),
        }
    }
}

/// Everything the screen depends on, borrowed from the portal.
pub struct Screen<'a> {
    pub data: &'a DataStore,
    pub identity: Option<&'a SessionIdentity>,
    pub login_error: Option<&'a str>,
    pub router: &'a ViewRouter,
    pub browser: &'a InstitutionBrowser,
    pub search: &'a MemberSearch,
    pub intake: &'a IntakeForm,
}

pub fn member_row(member: &Member) -> Vec<String> {
    vec![
        or_placeholder(member.full_name.as_deref()),
        or_placeholder(member.national_id.as_deref()),
        or_placeholder(member.job_title.as_deref()),
        or_placeholder(member.grade.as_deref()),
        or_placeholder(member.status.as_deref()),
        or_placeholder(member.position_in_union.as_deref()),
    ]
}

/// Member table over the given indices, in the given order.
pub fn members_table(data: &DataStore, indices: &[usize]) -> Node {
    Node::Table {
        headers: MEMBER_COLUMNS.to_vec(),
        rows: indices
            .iter()
            .filter_map(|idx| data.member(*idx))
            .map(member_row)
            .collect(),
    }
}

pub fn institution_details(inst: &Institution) -> Vec<Node> {
    [
        ("Institution", &inst.name),
        ("Address", &inst.address),
        ("Email", &inst.email),
        ("Landline", &inst.landline),
        ("Head", &inst.head_cell),
        ("Bursar", &inst.bursar_cell),
    ]
    .into_iter()
    .map(|(label, value)| Node::Field {
        label,
        value: or_placeholder(value.as_deref()),
    })
    .collect()
}

pub fn institution_panel(data: &DataStore, browser: &InstitutionBrowser) -> Vec<Node> {
    let select = Node::Select {
        id: "institution-select",
        options: browser.options().to_vec(),
        selected: browser.selected().to_string(),
    };

    let (details, members) = match browser.summary() {
        None => (Vec::new(), Vec::new()),
        Some(summary) => {
            let members = if summary.members.is_empty() {
                Node::notice(Tone::Muted, NO_INSTITUTION_MEMBERS)
            } else {
                members_table(data, &summary.members)
            };
            (institution_details(&summary.institution), vec![members])
        }
    };

    vec![
        select,
        Node::panel("institution-details", false, details),
        Node::panel("members-list", false, members),
    ]
}

pub fn search_panel(data: &DataStore, search: &MemberSearch) -> Vec<Node> {
    let results = match search.results() {
        None => Vec::new(),
        Some([]) => vec![Node::notice(Tone::Muted, NO_SEARCH_MATCHES)],
        Some(found) => vec![members_table(data, found)],
    };

    vec![
        Node::Input {
            id: "member-search".to_string(),
            value: search.raw().to_string(),
        },
        Node::panel("member-search-results", false, results),
    ]
}

pub fn intake_panel(form: &IntakeForm) -> Vec<Node> {
    let mut nodes: Vec<Node> = form
        .fields()
        .iter()
        .map(|field| Node::Input {
            id: field.name.clone().unwrap_or_default(),
            value: field.value.clone(),
        })
        .collect();

    let message = form
        .message()
        .map(|text| vec![Node::notice(Tone::Success, text)])
        .unwrap_or_default();
    nodes.push(Node::panel("add-member-success", false, message));
    nodes
}

fn login_card(hidden: bool, error: Option<&str>) -> Node {
    let error = error
        .map(|text| vec![Node::notice(Tone::Error, text)])
        .unwrap_or_default();
    Node::panel(
        "login-card",
        hidden,
        vec![
            Node::Text("Official login".to_string()),
            Node::panel("login-error", false, error),
        ],
    )
}

fn dashboard(screen: &Screen, identity: Option<&SessionIdentity>) -> Node {
    let Some(identity) = identity else {
        return Node::panel("dashboard", true, Vec::new());
    };

    let tabs = TABS
        .iter()
        .map(|&(id, label)| TabControl {
            id,
            label,
            active: screen.router.is_visible(id),
        })
        .collect();

    Node::panel(
        "dashboard",
        false,
        vec![
            Node::Text(format!("Logged in as: {}", identity.name)),
            Node::Tabs(tabs),
            Node::panel(
                TAB_INSTITUTIONS,
                !screen.router.is_visible(TAB_INSTITUTIONS),
                institution_panel(screen.data, screen.browser),
            ),
            Node::panel(
                TAB_MEMBER_LOOKUP,
                !screen.router.is_visible(TAB_MEMBER_LOOKUP),
                search_panel(screen.data, screen.search),
            ),
            Node::panel(
                TAB_ADD_MEMBER,
                !screen.router.is_visible(TAB_ADD_MEMBER),
                intake_panel(screen.intake),
            ),
        ],
    )
}

pub fn render_screen(screen: &Screen) -> Node {
    let logged_in = screen.identity.is_some();
    Node::panel(
        "app",
        false,
        vec![
            login_card(logged_in, screen.login_error),
            dashboard(screen, screen.identity),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::{institution, member};

    #[test]
    fn test_members_table_uses_placeholder_for_missing_cells() {
        let data = DataStore::new(vec![], vec![member("Bob", "Central")], vec![]);

        let table = members_table(&data, &[0]);

        assert_eq!(
            table,
            Node::Table {
                headers: MEMBER_COLUMNS.to_vec(),
                rows: vec![vec![
                    "Bob".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                ]],
            }
        );
    }

    #[test]
    fn test_institution_panel_renders_only_joined_members() {
        let data = DataStore::new(
            vec![],
            vec![member("Bob", "Central"), member("Cara", "North")],
            vec![institution("Central")],
        );
        let mut browser = InstitutionBrowser::new();
        browser.populate(data.institutions());
        browser.select(&data, "Central");

        let nodes = institution_panel(&data, &browser);

        let Node::Panel { children, .. } = &nodes[2] else {
            panic!("members panel missing");
        };
        let Node::Table { rows, .. } = &children[0] else {
            panic!("expected member table");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Bob");
    }

    #[test]
    fn test_institution_without_members_shows_notice() {
        let data = DataStore::new(vec![], vec![], vec![institution("Central")]);
        let mut browser = InstitutionBrowser::new();
        browser.select(&data, "Central");

        let nodes = institution_panel(&data, &browser);

        assert_eq!(
            nodes[2],
            Node::Panel {
                id: "members-list",
                hidden: false,
                children: vec![Node::Notice {
                    tone: Tone::Muted,
                    text: NO_INSTITUTION_MEMBERS.to_string(),
                }],
            }
        );
        let Node::Panel { children, .. } = &nodes[1] else {
            panic!("details panel missing");
        };
        assert_eq!(
            children[1],
            Node::Field {
                label: "Address",
                value: "-".to_string()
            }
        );
    }

    #[test]
    fn test_search_panel_states() {
        let data = DataStore::new(vec![], vec![member("Bob", "Central")], vec![]);
        let mut search = MemberSearch::new();

        search.input("x");
        assert_eq!(
            search_panel(&data, &search)[1],
            Node::Panel {
                id: "member-search-results",
                hidden: false,
                children: vec![],
            }
        );

        search.input("zz");
        search.execute(&data);
        assert_eq!(
            search_panel(&data, &search)[1],
            Node::Panel {
                id: "member-search-results",
                hidden: false,
                children: vec![Node::Notice {
                    tone: Tone::Muted,
                    text: NO_SEARCH_MATCHES.to_string(),
                }],
            }
        );
    }

    #[test]
    fn test_logged_out_screen_hides_dashboard() {
        let data = DataStore::default();
        let router = ViewRouter::new();
        let browser = InstitutionBrowser::new();
        let search = MemberSearch::new();
        let intake = IntakeForm::new();
        let screen = Screen {
            data: &data,
            identity: None,
            login_error: Some("Invalid Official ID or Password."),
            router: &router,
            browser: &browser,
            search: &search,
            intake: &intake,
        };

        let Node::Panel { children, .. } = render_screen(&screen) else {
            panic!("root must be a panel");
        };
        assert!(matches!(children[0], Node::Panel { id: "login-card", hidden: false, .. }));
        assert!(matches!(children[1], Node::Panel { id: "dashboard", hidden: true, .. }));
    }

    #[test]
    fn test_logged_in_screen_shows_only_the_active_tab() {
        let data = DataStore::default();
        let identity = SessionIdentity {
            id: "A1".to_string(),
            name: "Alice".to_string(),
        };
        let mut router = ViewRouter::new();
        router.show_tab(TAB_MEMBER_LOOKUP).unwrap();
        let browser = InstitutionBrowser::new();
        let search = MemberSearch::new();
        let intake = IntakeForm::new();
        let screen = Screen {
            data: &data,
            identity: Some(&identity),
            login_error: None,
            router: &router,
            browser: &browser,
            search: &search,
            intake: &intake,
        };

        let Node::Panel { children, .. } = render_screen(&screen) else {
            panic!("root must be a panel");
        };
        assert!(matches!(children[0], Node::Panel { id: "login-card", hidden: true, .. }));
        let Node::Panel { hidden: false, children: dashboard, .. } = &children[1] else {
            panic!("dashboard must be visible");
        };

        assert_eq!(dashboard[0], Node::Text("Logged in as: Alice".to_string()));

        let Node::Tabs(tabs) = &dashboard[1] else {
            panic!("expected tab strip");
        };
        let active: Vec<&str> = tabs.iter().filter(|tab| tab.active).map(|tab| tab.id).collect();
        assert_eq!(active, vec![TAB_MEMBER_LOOKUP]);

        let visible: Vec<&str> = dashboard[2..]
            .iter()
            .filter_map(|node| match node {
                Node::Panel { id, hidden: false, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(visible, vec![TAB_MEMBER_LOOKUP]);
        assert_eq!(dashboard.len(), 2 + TABS.len());
    }
}
