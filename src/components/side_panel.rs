use dioxus::prelude::*;
use crate::constants::*;
use crate::state::ViewTab;

/// Right-hand panel with one tab strip; the active tab's content is `children`.
#[component]
pub fn SidePanel(
    active: ViewTab,
    width: f64,
    on_select: EventHandler<ViewTab>,
    children: Element,
) -> Element {
    rsx! {
        div {
            style: "
                display: flex; flex-direction: column;
                width: {width}px; min-width: {width}px;
                background-color: {BG_ELEVATED}; border-left: 1px solid {BORDER_DEFAULT};
                overflow: hidden;
            ",
            div {
                style: "
                    display: flex; align-items: stretch;
                    height: 32px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                    flex-shrink: 0;
                ",
                for tab in ViewTab::ALL {
                    {
                        let selected = tab == active;
                        let color = if selected { TEXT_PRIMARY } else { TEXT_MUTED };
                        let underline = if selected { BORDER_ACCENT } else { "transparent" };
                        rsx! {
                            button {
                                key: "{tab.label()}",
                                class: "collapse-btn",
                                style: "
                                    flex: 1; border: none; background: transparent; cursor: pointer;
                                    font-size: 11px; font-weight: 500; color: {color};
                                    text-transform: uppercase; letter-spacing: 0.5px;
                                    border-bottom: 2px solid {underline};
                                ",
                                onclick: move |_| on_select.call(tab),
                                "{tab.label()}"
                            }
                        }
                    }
                }
            }
            div {
                style: "flex: 1; overflow-y: auto;",
                {children}
            }
        }
    }
}
