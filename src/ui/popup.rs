//! Popup UI for the Tab Organizer extension

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;
use crate::operations::{
    GroupPlan, TabStats, closed_duplicates_message, grouped_tab_ids, key_saved_message,
    make_tabs_unique, not_enough_tabs_message, organized_message, plan_groups,
    remote_fallback_message, ungrouped_message,
};
use crate::organizer::{Organizer, Outcome};
use crate::storage::{CredentialStore, SaveOutcome, save_credential};
use crate::ui::bridge::{
    ChromeHost, apply_groups, count_groups, get_current_tabs, load_config, remove_tabs,
    ungroup_tabs,
};

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Error(String),
}

#[derive(Clone, PartialEq)]
struct Status {
    message: String,
    is_warning: bool,
}

impl Status {
    fn info(message: String) -> Status {
        Status { message, is_warning: false }
    }

    fn warning(message: String) -> Status {
        Status { message, is_warning: true }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);
    let stats = use_state(TabStats::default);
    let status = use_state(|| None::<Status>);
    let results = use_state(Vec::<GroupPlan>::new);
    let settings_open = use_state(|| false);
    let key_input = use_state(String::new);

    // Scan tabs and load the saved key on mount
    {
        let stats = stats.clone();
        let key_input = key_input.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                refresh_stats(stats).await;
                if let Ok(Some(key)) = ChromeHost.get().await {
                    key_input.set(key);
                }
            });
            || ()
        });
    }

    // Organize handler
    let on_organize = {
        let state = state.clone();
        let stats = stats.clone();
        let status = status.clone();
        let results = results.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let stats = stats.clone();
            let status = status.clone();
            let results = results.clone();

            state.set(AppState::Loading("Thinking about your tabs...".to_string()));

            spawn_local(async move {
                match organize_window().await {
                    Ok(Some((plans, message))) => {
                        results.set(plans);
                        status.set(Some(message));
                        state.set(AppState::Idle);
                    }
                    Ok(None) => {
                        status.set(Some(Status::info(not_enough_tabs_message())));
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Something went wrong: {}", e)));
                    }
                }
                refresh_stats(stats).await;
            });
        })
    };

    // Close duplicates handler
    let on_close_dupes = {
        let state = state.clone();
        let stats = stats.clone();
        let status = status.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let stats = stats.clone();
            let status = status.clone();

            state.set(AppState::Loading("Closing duplicates...".to_string()));

            spawn_local(async move {
                match close_duplicates().await {
                    Ok(0) => state.set(AppState::Idle),
                    Ok(count) => {
                        status.set(Some(Status::info(closed_duplicates_message(count))));
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Failed to close duplicates: {}", e)));
                    }
                }
                refresh_stats(stats).await;
            });
        })
    };

    // Ungroup handler
    let on_ungroup = {
        let state = state.clone();
        let stats = stats.clone();
        let status = status.clone();
        let results = results.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let stats = stats.clone();
            let status = status.clone();
            let results = results.clone();

            state.set(AppState::Loading("Ungrouping tabs...".to_string()));

            spawn_local(async move {
                match ungroup_window().await {
                    Ok(count) => {
                        if count > 0 {
                            results.set(Vec::new());
                        }
                        status.set(Some(Status::info(ungrouped_message(count))));
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Failed to ungroup: {}", e)));
                    }
                }
                refresh_stats(stats).await;
            });
        })
    };

    let on_toggle_settings = {
        let settings_open = settings_open.clone();
        Callback::from(move |_| settings_open.set(!*settings_open))
    };

    let on_key_input = {
        let key_input = key_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                key_input.set(input.value());
            }
        })
    };

    // Save API key handler
    let on_save_key = {
        let key_input = key_input.clone();
        let status = status.clone();

        Callback::from(move |_| {
            let key = (*key_input).clone();
            let status = status.clone();

            spawn_local(async move {
                match save_credential(&ChromeHost, &key).await {
                    Ok(SaveOutcome::Saved { len }) => {
                        status.set(Some(Status::info(key_saved_message(Some(len)))));
                    }
                    Ok(SaveOutcome::Cleared) => {
                        status.set(Some(Status::info(key_saved_message(None))));
                    }
                    Err(e) => {
                        status.set(Some(Status::warning(format!("Error saving: {}", e))));
                    }
                }
            });
        })
    };

    let is_busy = !matches!(*state, AppState::Idle);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Organizer"}</h1>

            // Window stats
            <div class="stats-row">
                <div class="stat-item">
                    <span class="stat-count">{stats.tabs}</span>
                    <span class="stat-label">{"tabs"}</span>
                </div>
                <div class="stat-item">
                    <span class="stat-count">{stats.duplicates}</span>
                    <span class="stat-label">{"duplicates"}</span>
                </div>
                <div class="stat-item">
                    <span class="stat-count">{stats.groups}</span>
                    <span class="stat-label">{"groups"}</span>
                </div>
            </div>

            // Duplicate banner
            if stats.duplicates > 0 {
                <Alert r#type={AlertType::Warning} title={format!("{} duplicate tabs found", stats.duplicates)} inline={true}>
                    <Button onclick={on_close_dupes} disabled={is_busy} variant={ButtonVariant::Secondary}>
                        {"Close duplicates"}
                    </Button>
                </Alert>
            }

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            if let Some(current) = (*status).clone() {
                <div class="message-top-margin">
                    <Alert
                        r#type={if current.is_warning { AlertType::Warning } else { AlertType::Success }}
                        title={current.message}
                        inline={true}
                    >
                    </Alert>
                </div>
            }

            <div class="flex-column-gap">
                <Button onclick={on_organize} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                    {"Organize My Tabs"}
                </Button>
                <Button onclick={on_ungroup} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"Ungroup All"}
                </Button>
                <Button onclick={on_toggle_settings} variant={ButtonVariant::Secondary}>
                    {"Settings"}
                </Button>
            </div>

            // Settings panel
            if *settings_open {
                <div class="settings-panel">
                    <label class="settings-label">{"Anthropic API key (optional)"}</label>
                    <input
                        class="pf-v5-c-form-control"
                        type="password"
                        placeholder="sk-ant-..."
                        value={(*key_input).clone()}
                        oninput={on_key_input}
                    />
                    <Button onclick={on_save_key} variant={ButtonVariant::Secondary}>
                        {"Save key"}
                    </Button>
                </div>
            }

            // Created groups
            if !results.is_empty() {
                <div class="results">
                    {for results.iter().map(|plan| html! {
                        <div class="result-item">
                            <div class="group-color" style={format!("background: {}", plan.color.css_color())}></div>
                            <span class="group-name">{&plan.title}</span>
                            <span class="group-count">
                                {format!("{} tab{}", plan.tab_ids.len(), if plan.tab_ids.len() == 1 { "" } else { "s" })}
                            </span>
                        </div>
                    })}
                </div>
            }

            <p class="footer-popup">
                {"Tab Organizer v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn refresh_stats(stats: UseStateHandle<TabStats>) {
    let tabs = match get_current_tabs().await {
        Ok(tabs) => tabs,
        Err(e) => {
            log::warn!("Failed to scan tabs: {}", e);
            return;
        }
    };
    let groups = count_groups().await.unwrap_or_else(|e| {
        log::warn!("Failed to count groups: {}", e);
        0
    });
    stats.set(TabStats::collect(&tabs, groups));
}

/// Categorize the window's candidate tabs and create the groups.
/// `Ok(None)` means there were too few tabs to organize.
async fn organize_window() -> Result<Option<(Vec<GroupPlan>, Status)>, String> {
    let config = load_config().await;
    let tabs = get_current_tabs().await.map_err(|e| e.to_string())?;
    let host = ChromeHost;

    let organized = match Organizer::new(&host, &host, &config).organize(&tabs).await {
        Outcome::NothingToDo { .. } => return Ok(None),
        Outcome::Organized(organized) => organized,
    };

    let plans = plan_groups(&organized.assignment, &config.group_colors);
    apply_groups(&plans).await.map_err(|e| e.to_string())?;

    let summary = organized_message(organized.tab_count, plans.len());
    let status = match organized.warning {
        Some(reason) => Status::warning(format!("{} · {}", remote_fallback_message(&reason), summary)),
        None => Status::info(summary),
    };

    Ok(Some((plans, status)))
}

async fn close_duplicates() -> Result<usize, String> {
    let tabs = get_current_tabs().await.map_err(|e| e.to_string())?;
    let (_, remove_ids) = make_tabs_unique(&tabs);

    if remove_ids.is_empty() {
        log::info!("No duplicates found");
        return Ok(0);
    }

    remove_tabs(&remove_ids).await.map_err(|e| e.to_string())?;
    Ok(remove_ids.len())
}

async fn ungroup_window() -> Result<usize, String> {
    let tabs = get_current_tabs().await.map_err(|e| e.to_string())?;
    let grouped = grouped_tab_ids(&tabs);

    ungroup_tabs(&grouped).await.map_err(|e| e.to_string())?;
    Ok(grouped.len())
}
