use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Panel, div, "bg-card text-card-foreground flex flex-col gap-4 rounded-xl border py-6 shadow-sm"}
    clx! {PanelHeader, div, "flex flex-col items-start gap-1.5 px-6"}
    clx! {PanelTitle, h1, "leading-none font-semibold"}
    clx! {PanelDescription, p, "text-muted-foreground text-sm"}
    clx! {PanelContent, div, "px-6"}
}

pub use components::*;
