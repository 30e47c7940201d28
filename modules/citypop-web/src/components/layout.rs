use dioxus::prelude::*;

/// Seconds between reloads while the initial fetch is pending.
const LOADING_REFRESH_SECS: &str = "2";

/// Page shell: head assets, title bar, and an optional auto-refresh.
#[allow(non_snake_case)]
#[component]
pub fn Layout(title: String, refresh: bool, children: Element) -> Element {
    let full_title = format!("{title} | Pakistan City Population");
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            if refresh {
                meta { http_equiv: "refresh", content: LOADING_REFRESH_SECS }
            }
            title { "{full_title}" }
            script { src: "https://cdn.tailwindcss.com" }
            script { src: "https://cdn.jsdelivr.net/npm/chart.js" }
        }
        body { class: "min-h-screen bg-gray-50 font-sans text-gray-900",
            div { class: "bg-gray-900 text-white px-6 py-4 text-lg font-semibold",
                "Pakistan City Population Dashboard"
            }
            div { class: "max-w-7xl mx-auto p-6",
                {children}
            }
        }
    }
}
