pub mod catalog;
pub mod config;
pub mod deck;
pub mod events;
pub mod fever;
pub mod quotes;
pub mod selector;
pub mod store;

use catalog::{fetch_catalog, Catalog, Category};
use config::FEVER_TICK_MS;
use deck::{CardEntry, Deck};
use events::DeckEvent;
use gloo_timers::callback::Interval;
use quotes::fetch_quote_book;
use std::cell::RefCell;
use std::rc::Rc;
use store::{BrowserStore, Preferences};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

const SWIPE_THRESHOLD: f64 = 80.0;
const CATALOG_URL: &str = "assets/catalog.json";
const QUOTES_URL: &str = "assets/quotes.tsv";
const TAGS_URL: &str = "assets/tags.tsv";

type SharedDeck = Rc<RefCell<Deck<BrowserStore>>>;
type SharedPrefs = Rc<RefCell<Preferences<BrowserStore>>>;

#[derive(Clone, PartialEq)]
struct DragState {
    pointer_id: i32,
    start_x: f64,
    current_x: f64,
}

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Swipe,
    Gallery,
    Counter,
}

struct Session {
    deck: SharedDeck,
    prefs: SharedPrefs,
    catalog: Rc<Catalog>,
}

#[function_component(App)]
fn app() -> Html {
    let status = use_state(|| FetchStatus::Loading);
    let session = use_state(|| None::<Rc<Session>>);
    let active_tab = use_state(|| Tab::Swipe);

    // Deck mutations notify through the event bus; handlers queue the event
    // and bump the revision so the effect below reacts outside the borrow.
    let revision = use_state(|| 0u64);
    let revision_counter = use_mut_ref(|| 0u64);
    let pending_events = use_mut_ref(Vec::<DeckEvent>::new);
    let fever_timer = use_mut_ref(|| None::<Interval>);
    let no_content = use_state(|| false);

    let drag_state = use_state(|| None::<DragState>);
    let gallery_person = use_state(|| None::<String>);
    let gallery_favorites_only = use_state(|| false);
    let menu_open = use_state(|| false);
    let show_reset_confirm = use_state(|| false);

    let bump = {
        let revision = revision.clone();
        let revision_counter = revision_counter.clone();
        Callback::from(move |_: ()| {
            let next = *revision_counter.borrow() + 1;
            *revision_counter.borrow_mut() = next;
            revision.set(next);
        })
    };

    {
        let status = status.clone();
        let session = session.clone();
        let pending_events = pending_events.clone();
        let bump = bump.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_catalog(CATALOG_URL).await {
                        Ok(file) => {
                            let book = fetch_quote_book(QUOTES_URL, TAGS_URL).await;
                            let catalog = Rc::new(Catalog::new(file.people));
                            let prefs =
                                Rc::new(RefCell::new(Preferences::load(BrowserStore)));
                            let mut deck = Deck::new(
                                catalog.clone(),
                                Rc::new(book),
                                prefs.clone(),
                                file.settings,
                            );
                            {
                                let pending_events = pending_events.clone();
                                let bump = bump.clone();
                                deck.subscribe(move |event| {
                                    pending_events.borrow_mut().push(event.clone());
                                    bump.emit(());
                                });
                            }
                            deck.rebuild();
                            session.set(Some(Rc::new(Session {
                                deck: Rc::new(RefCell::new(deck)),
                                prefs,
                                catalog,
                            })));
                            status.set(FetchStatus::Idle);
                        }
                        Err(err) => status.set(FetchStatus::Error(err.to_string())),
                    }
                });

                || ()
            },
            (),
        );
    }

    {
        let session = session.clone();
        let pending_events = pending_events.clone();
        let fever_timer = fever_timer.clone();
        let no_content = no_content.clone();
        let showing_empty = *no_content;

        use_effect_with_deps(
            move |_| {
                let drained: Vec<DeckEvent> = pending_events.borrow_mut().drain(..).collect();
                if let Some(session) = (*session).clone() {
                    for event in drained {
                        match event {
                            DeckEvent::FeverEntered => {
                                let deck = session.deck.clone();
                                // Replacing the handle cancels any countdown
                                // already running.
                                *fever_timer.borrow_mut() =
                                    Some(Interval::new(FEVER_TICK_MS, move || {
                                        deck.borrow_mut().tick(FEVER_TICK_MS);
                                    }));
                            }
                            DeckEvent::FeverExited => {
                                *fever_timer.borrow_mut() = None;
                            }
                            DeckEvent::NoContentAvailable => {
                                if !showing_empty {
                                    no_content.set(true);
                                }
                            }
                            DeckEvent::CardChanged => {
                                if showing_empty {
                                    no_content.set(false);
                                }
                            }
                            DeckEvent::FavoriteToggled { .. } => {}
                        }
                    }
                }

                || ()
            },
            *revision,
        );
    }

    {
        let drag_state = drag_state.clone();
        use_effect_with_deps(
            move |state: &Option<DragState>| {
                let background = state
                    .as_ref()
                    .and_then(|drag| body_background_for_delta(drag.current_x - drag.start_x));
                if let Some(window) = window() {
                    if let Some(document) = window.document() {
                        if let Some(body) = document.body() {
                            let style = body.style();
                            let _ = style.set_property("transition", "background 0.25s ease");
                            match background {
                                Some(gradient) => {
                                    let _ = style.set_property("background", &gradient);
                                }
                                None => {
                                    let _ = style.remove_property("background");
                                }
                            }
                        }
                    }
                }
                || ()
            },
            (*drag_state).clone(),
        );
    }

    let on_swipe = {
        let session = session.clone();
        Callback::from(move |accepted: bool| {
            let Some(session) = (*session).clone() else {
                return;
            };
            if accepted {
                session.deck.borrow_mut().accept();
            } else {
                session.deck.borrow_mut().reject();
            }
        })
    };

    let on_toggle_favorite = {
        let session = session.clone();
        Callback::from(move |key: String| {
            let Some(session) = (*session).clone() else {
                return;
            };
            session.deck.borrow_mut().toggle_favorite(&key);
        })
    };

    let on_weight_change = {
        let session = session.clone();
        Callback::from(move |(person, weight): (String, u32)| {
            let Some(session) = (*session).clone() else {
                return;
            };
            session.deck.borrow_mut().set_weight(&person, weight);
        })
    };

    let on_tally_add = {
        let session = session.clone();
        let bump = bump.clone();
        Callback::from(move |delta: i64| {
            let Some(session) = (*session).clone() else {
                return;
            };
            session.prefs.borrow_mut().tally_add(delta);
            bump.emit(());
        })
    };

    let on_tally_reset = {
        let session = session.clone();
        let bump = bump.clone();
        Callback::from(move |_: ()| {
            let Some(session) = (*session).clone() else {
                return;
            };
            session.prefs.borrow_mut().tally_reset();
            bump.emit(());
        })
    };

    let toggle_menu_button = {
        let menu_open = menu_open.clone();
        let show_reset_confirm = show_reset_confirm.clone();
        Callback::from(move |_: MouseEvent| {
            let next = !*menu_open;
            menu_open.set(next);
            if !next {
                show_reset_confirm.set(false);
            }
        })
    };

    let menu_close = {
        let menu_open = menu_open.clone();
        let show_reset_confirm = show_reset_confirm.clone();
        Callback::from(move |_| {
            if *menu_open {
                menu_open.set(false);
                show_reset_confirm.set(false);
            }
        })
    };

    let request_reset = {
        let show_reset_confirm = show_reset_confirm.clone();
        Callback::from(move |_| show_reset_confirm.set(true))
    };

    let cancel_reset = {
        let show_reset_confirm = show_reset_confirm.clone();
        Callback::from(move |_| show_reset_confirm.set(false))
    };

    let confirm_reset = {
        let session = session.clone();
        let show_reset_confirm = show_reset_confirm.clone();
        let bump = bump.clone();
        Callback::from(move |_| {
            if let Some(session) = (*session).clone() {
                session.deck.borrow_mut().clear_history();
            }
            show_reset_confirm.set(false);
            bump.emit(());
        })
    };

    let select_tab = {
        let active_tab = active_tab.clone();
        Callback::from(move |tab: Tab| active_tab.set(tab))
    };

    let content = match &*status {
        FetchStatus::Loading => html! { <p class="splash">{ "Loading catalog…" }</p> },
        FetchStatus::Error(message) => html! { <p class="error">{ message }</p> },
        FetchStatus::Idle => match (*session).clone() {
            Some(session_ref) => match *active_tab {
                Tab::Swipe => render_swipe_view(
                    &session_ref,
                    &drag_state,
                    *no_content,
                    &on_swipe,
                    &on_toggle_favorite,
                ),
                Tab::Gallery => render_gallery_view(
                    &session_ref,
                    &gallery_person,
                    &gallery_favorites_only,
                    &on_toggle_favorite,
                ),
                Tab::Counter => {
                    render_counter_view(&session_ref, &on_tally_add, &on_tally_reset)
                }
            },
            None => html! { <p class="splash">{ "Loading catalog…" }</p> },
        },
    };

    let menu_markup = render_menu(
        *menu_open,
        *show_reset_confirm,
        &session,
        menu_close,
        on_weight_change,
        request_reset,
        cancel_reset,
        confirm_reset,
    );

    let fever_class = (*session)
        .as_ref()
        .filter(|session| session.deck.borrow().fever_active())
        .map(|_| "fever-active");

    html! {
        <div class={classes!("app-container", fever_class)}>
            <button class={classes!("hamburger-button", if *menu_open { "open" } else { "" })}
                onclick={toggle_menu_button}>
                <span></span>
                <span></span>
                <span></span>
            </button>
            { menu_markup }
            <main class="content single-column">
                { content }
            </main>
            { render_tab_bar(*active_tab, &select_tab) }
        </div>
    }
}

fn render_tab_bar(active: Tab, select_tab: &Callback<Tab>) -> Html {
    let tab_button = |tab: Tab, label: &'static str| {
        let select_tab = select_tab.clone();
        let class = if tab == active {
            "tab-button active"
        } else {
            "tab-button"
        };
        let onclick = Callback::from(move |_: MouseEvent| select_tab.emit(tab));
        html! { <button {class} {onclick}>{ label }</button> }
    };

    html! {
        <nav class="tab-bar">
            { tab_button(Tab::Swipe, "Swipe") }
            { tab_button(Tab::Gallery, "Gallery") }
            { tab_button(Tab::Counter, "Counter") }
        </nav>
    }
}

fn render_fever_gauge(deck: &Deck<BrowserStore>) -> Html {
    if deck.fever_active() {
        let width = deck.fever_fraction() * 100.0;
        html! {
            <div class="gauge fever">
                <div class="gauge-fill" style={format!("width: {width:.1}%;")}></div>
                <span class="gauge-label">{ "Fever!" }</span>
            </div>
        }
    } else {
        let threshold = deck.fever_threshold().max(1);
        let filled = deck.fever_gauge().min(threshold);
        let width = f64::from(filled) / f64::from(threshold) * 100.0;
        html! {
            <div class="gauge">
                <div class="gauge-fill" style={format!("width: {width:.1}%;")}></div>
                <span class="gauge-label">{ format!("{filled} / {threshold}") }</span>
            </div>
        }
    }
}

fn render_swipe_view(
    session: &Rc<Session>,
    drag_state: &UseStateHandle<Option<DragState>>,
    no_content: bool,
    on_swipe: &Callback<bool>,
    on_toggle_favorite: &Callback<String>,
) -> Html {
    let deck = session.deck.borrow();
    let gauge = render_fever_gauge(&deck);

    let Some(top) = deck.peek_top().cloned() else {
        let message = if no_content {
            "Nothing to show — the catalog has no swipeable items."
        } else {
            "Shuffling the deck…"
        };
        return html! {
            <div class="swipe-wrapper">
                { gauge }
                <p class="empty-panel">{ message }</p>
            </div>
        };
    };
    drop(deck);

    let drag_delta = (*drag_state)
        .as_ref()
        .map(|drag| drag.current_x - drag.start_x)
        .unwrap_or(0.0);
    let is_dragging = (*drag_state).is_some();
    let transform_style = format!(
        "transform: translateX({:.1}px) rotate({:.2}deg); transition: {}; border-color: {};",
        drag_delta,
        drag_delta * 0.05,
        if is_dragging {
            "transform 0s"
        } else {
            "transform 0.25s ease"
        },
        top.item.color,
    );

    let pointer_down = {
        let drag_state = drag_state.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            event.prevent_default();
            if (*drag_state).is_some() {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            drag_state.set(Some(DragState {
                pointer_id: event.pointer_id(),
                start_x: event.client_x() as f64,
                current_x: event.client_x() as f64,
            }));
        })
    };

    let pointer_move = {
        let drag_state = drag_state.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if let Some(mut state) = (*drag_state).clone() {
                if state.pointer_id == event.pointer_id() {
                    event.prevent_default();
                    state.current_x = event.client_x() as f64;
                    drag_state.set(Some(state));
                }
            }
        })
    };

    let pointer_end = {
        let drag_state = drag_state.clone();
        let on_swipe = on_swipe.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if let Some(state) = (*drag_state).clone() {
                if state.pointer_id == event.pointer_id() {
                    if let Some(target) = event
                        .target()
                        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                    {
                        let _ = target.release_pointer_capture(event.pointer_id());
                    }
                    let delta = state.current_x - state.start_x;
                    if delta.abs() > SWIPE_THRESHOLD {
                        on_swipe.emit(delta > 0.0);
                    }
                    drag_state.set(None);
                }
            }
        })
    };

    let pointer_cancel = {
        let drag_state = drag_state.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if let Some(state) = (*drag_state).clone() {
                if state.pointer_id == event.pointer_id() {
                    if let Some(target) = event
                        .target()
                        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                    {
                        let _ = target.release_pointer_capture(event.pointer_id());
                    }
                    drag_state.set(None);
                }
            }
        })
    };

    let key = top.item.key();
    let favorite = session.prefs.borrow().is_favorite(&key);
    let favorite_click = {
        let on_toggle_favorite = on_toggle_favorite.clone();
        Callback::from(move |_: MouseEvent| on_toggle_favorite.emit(key.clone()))
    };
    let swallow_pointer =
        Callback::from(|event: web_sys::PointerEvent| event.stop_propagation());

    let skip_click = {
        let on_swipe = on_swipe.clone();
        Callback::from(move |_: MouseEvent| on_swipe.emit(false))
    };
    let like_click = {
        let on_swipe = on_swipe.clone();
        Callback::from(move |_: MouseEvent| on_swipe.emit(true))
    };

    html! {
        <div class="swipe-wrapper">
            { gauge }
            <div class="card-container">
                <div class="swipe-card"
                    style={transform_style}
                    onpointerdown={pointer_down}
                    onpointermove={pointer_move}
                    onpointerup={pointer_end}
                    onpointercancel={pointer_cancel}>
                    <img class="card-photo"
                        src={top.item.path.clone()}
                        alt={top.item.person.clone()}
                        draggable="false" />
                    <div class="card-body">
                        <div class="card-heading">
                            <span class="card-person" style={format!("color: {};", top.item.color)}>
                                { &top.item.person }
                            </span>
                            <span class="card-seq">{ format!("#{}", top.item.seq) }</span>
                            <button class={classes!("favorite-button", favorite.then_some("on"))}
                                onclick={favorite_click}
                                onpointerdown={swallow_pointer}>
                                { if favorite { "★" } else { "☆" } }
                            </button>
                        </div>
                        { render_card_quote(&top) }
                        { render_card_tags(&top) }
                    </div>
                </div>
            </div>
            <div class="swipe-actions">
                <button class="action skip" onclick={skip_click}>{ "Skip" }</button>
                <button class="action like" onclick={like_click}>{ "Like" }</button>
            </div>
        </div>
    }
}

fn render_card_quote(entry: &CardEntry) -> Html {
    match &entry.quote {
        Some(quote) => html! { <p class="card-quote">{ format!("“{}”", quote.text) }</p> },
        None => html! {},
    }
}

fn render_card_tags(entry: &CardEntry) -> Html {
    let mut tags: Vec<&String> = entry.tags.iter().collect();
    if let Some(quote) = &entry.quote {
        tags.extend(quote.tags.iter());
    }
    if tags.is_empty() {
        return html! {};
    }
    html! {
        <div class="card-tags">
            { for tags.into_iter().map(|tag| html! { <span class="tag">{ tag }</span> }) }
        </div>
    }
}

fn render_gallery_view(
    session: &Rc<Session>,
    person_filter: &UseStateHandle<Option<String>>,
    favorites_only: &UseStateHandle<bool>,
    on_toggle_favorite: &Callback<String>,
) -> Html {
    let prefs = session.prefs.borrow();
    let selected = (**person_filter).clone();

    let person_change = {
        let person_filter = person_filter.clone();
        Callback::from(move |event: Event| {
            let value = event.target_unchecked_into::<HtmlSelectElement>().value();
            person_filter.set(if value.is_empty() { None } else { Some(value) });
        })
    };
    let favorites_change = {
        let favorites_only = favorites_only.clone();
        Callback::from(move |event: Event| {
            favorites_only.set(event.target_unchecked_into::<HtmlInputElement>().checked());
        })
    };

    let tiles: Vec<Html> = Category::ALL
        .iter()
        .flat_map(|category| session.catalog.items(*category))
        .filter(|item| {
            selected
                .as_ref()
                .map(|person| item.person == *person)
                .unwrap_or(true)
        })
        .filter(|item| !**favorites_only || prefs.is_favorite(&item.key()))
        .map(|item| {
            let key = item.key();
            let favorite = prefs.is_favorite(&key);
            let toggle = {
                let on_toggle_favorite = on_toggle_favorite.clone();
                let key = key.clone();
                Callback::from(move |_: MouseEvent| on_toggle_favorite.emit(key.clone()))
            };
            html! {
                <figure class="gallery-tile" key={key.clone()}
                    style={format!("border-color: {};", item.color)}>
                    <img src={item.path.clone()} alt={item.person.clone()} loading="lazy" />
                    <figcaption>
                        <span>{ format!("{} · {} #{}", item.person, item.category.as_str(), item.seq) }</span>
                        <button class={classes!("favorite-button", favorite.then_some("on"))}
                            onclick={toggle}>
                            { if favorite { "★" } else { "☆" } }
                        </button>
                    </figcaption>
                </figure>
            }
        })
        .collect();

    html! {
        <div class="gallery-wrapper">
            <div class="gallery-filters">
                <select onchange={person_change}>
                    <option value="" selected={selected.is_none()}>{ "All people" }</option>
                    { for session.catalog.people().iter().map(|person| {
                        let is_selected = selected.as_deref() == Some(person.name.as_str());
                        html! {
                            <option value={person.name.clone()} selected={is_selected}>
                                { &person.name }
                            </option>
                        }
                    }) }
                </select>
                <label class="favorites-filter">
                    <input type="checkbox" checked={**favorites_only} onchange={favorites_change} />
                    { "Favorites only" }
                </label>
            </div>
            {
                if tiles.is_empty() {
                    html! { <p class="empty-panel">{ "No items match this filter." }</p> }
                } else {
                    html! { <div class="gallery-grid">{ for tiles.into_iter() }</div> }
                }
            }
        </div>
    }
}

fn render_counter_view(
    session: &Rc<Session>,
    on_tally_add: &Callback<i64>,
    on_tally_reset: &Callback<()>,
) -> Html {
    let tally = session.prefs.borrow().tally();
    let add = |delta: i64| {
        let on_tally_add = on_tally_add.clone();
        Callback::from(move |_: MouseEvent| on_tally_add.emit(delta))
    };
    let reset = {
        let on_tally_reset = on_tally_reset.clone();
        Callback::from(move |_: MouseEvent| on_tally_reset.emit(()))
    };

    html! {
        <div class="counter-wrapper">
            <p class="counter-value">{ tally }</p>
            <div class="counter-actions">
                <button class="action" onclick={add(-1)}>{ "−1" }</button>
                <button class="action" onclick={add(1)}>{ "+1" }</button>
            </div>
            <button class="counter-reset" onclick={reset}>{ "Reset" }</button>
        </div>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_menu(
    menu_open: bool,
    show_reset_confirm: bool,
    session: &UseStateHandle<Option<Rc<Session>>>,
    on_close: Callback<()>,
    on_weight_change: Callback<(String, u32)>,
    on_request_reset: Callback<()>,
    on_cancel_reset: Callback<()>,
    on_confirm_reset: Callback<()>,
) -> Html {
    let overlay_classes = classes!("menu-overlay", if menu_open { Some("open") } else { None });
    let panel_classes = classes!("menu-panel", if menu_open { Some("open") } else { None });
    let stop_click = Callback::from(|event: web_sys::MouseEvent| event.stop_propagation());
    let close_click = {
        let on_close = on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let request_reset_click = {
        let on_request_reset = on_request_reset.clone();
        Callback::from(move |_: MouseEvent| on_request_reset.emit(()))
    };
    let cancel_reset_click = {
        let on_cancel_reset = on_cancel_reset.clone();
        Callback::from(move |_: MouseEvent| on_cancel_reset.emit(()))
    };
    let confirm_reset_click = {
        let on_confirm_reset = on_confirm_reset.clone();
        Callback::from(move |_: MouseEvent| on_confirm_reset.emit(()))
    };

    let weights_section = match &**session {
        Some(session_ref) => {
            let default_weight = session_ref.deck.borrow().config().default_weight;
            let prefs = session_ref.prefs.borrow();
            html! {
                <div class="weight-sliders">
                    { for session_ref.catalog.people().iter().map(|person| {
                        let name = person.name.clone();
                        let weight = prefs.weight_of(&name, default_weight);
                        let oninput = {
                            let on_weight_change = on_weight_change.clone();
                            let name = name.clone();
                            Callback::from(move |event: InputEvent| {
                                let raw = event
                                    .target_unchecked_into::<HtmlInputElement>()
                                    .value();
                                let weight = raw.parse().unwrap_or(1);
                                on_weight_change.emit((name.clone(), weight));
                            })
                        };
                        html! {
                            <label class="weight-row" key={name.clone()}>
                                <span class="weight-name" style={format!("color: {};", person.color)}>
                                    { &name }
                                </span>
                                <input type="range" min="0" max="10" step="1"
                                    value={weight.to_string()} {oninput} />
                                <span class="weight-value">{ weight }</span>
                            </label>
                        }
                    }) }
                </div>
            }
        }
        None => {
            html! { <p class="menu-placeholder">{ "Weights appear once the catalog loads." }</p> }
        }
    };

    let stats_section = match &**session {
        Some(session_ref) => {
            let prefs = session_ref.prefs.borrow();
            html! {
                <p class="menu-stats">
                    { format!(
                        "Liked: {} · Favorites: {}",
                        prefs.history().len(),
                        prefs.favorites().len()
                    ) }
                </p>
            }
        }
        None => html! {},
    };

    html! {
        <div class={overlay_classes} onclick={close_click.clone()}>
            <aside class={panel_classes} onclick={stop_click}>
                <div class="menu-header">
                    <h2>{ "Settings" }</h2>
                    <button class="menu-close" onclick={close_click}>{ "×" }</button>
                </div>

                <div class="menu-section">
                    <h3>{ "Sampling weights" }</h3>
                    { weights_section }
                </div>

                <div class="menu-section">
                    {
                        if show_reset_confirm {
                            html! {
                                <div class="reset-confirm">
                                    <p>{ "Clear the liked history? Fever mode feeds on it." }</p>
                                    <div class="confirm-actions">
                                        <button class="confirm-yes" onclick={confirm_reset_click}>{ "Yes" }</button>
                                        <button class="confirm-no" onclick={cancel_reset_click}>{ "No" }</button>
                                    </div>
                                </div>
                            }
                        } else {
                            html! {
                                <button class="menu-action reset" onclick={request_reset_click}>
                                    { "Clear liked history" }
                                </button>
                            }
                        }
                    }
                </div>

                <div class="menu-section">
                    { stats_section }
                </div>
            </aside>
        </div>
    }
}

fn body_background_for_delta(delta: f64) -> Option<String> {
    let normalized = (delta / SWIPE_THRESHOLD).clamp(-1.0, 1.0);
    if normalized.abs() < 0.01 {
        return None;
    }

    let strength = normalized.abs();
    let start_alpha = 0.18 * strength;
    let end_alpha = 0.38 * strength + 0.02;
    if normalized < 0.0 {
        // Leftward drag, the cool skip tint.
        Some(format!(
            "radial-gradient(circle at top, rgba(70, 96, 148, {:.3}), rgba(14, 21, 44, {:.3}))",
            start_alpha, end_alpha
        ))
    } else {
        Some(format!(
            "radial-gradient(circle at top, rgba(255, 92, 138, {:.3}), rgba(104, 12, 52, {:.3}))",
            start_alpha, end_alpha
        ))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
