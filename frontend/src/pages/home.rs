use chrono::Datelike;
use yew::prelude::*;
use yew_router::components::Link;

use crate::{ProjectLauncher, Route};

fn launch(launcher: Option<ProjectLauncher>) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        if let Some(ProjectLauncher(open)) = &launcher {
            open.emit(());
        }
    })
}

#[function_component(Home)]
pub fn home() -> Html {
    let launcher = use_context::<ProjectLauncher>();

    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="landing-page">
            <style>{HOME_CSS}</style>
            <section class="hero">
                <div class="hero-content">
                    <div class="hero-badge">
                        <span class="hero-badge-dot"></span>
                        {"Accepting new projects for Q4"}
                    </div>
                    <h1>
                        {"We Build "}
                        <span class="gradient-text">{"Explainable"}</span>
                        {", Modular Web Products."}
                    </h1>
                    <p class="hero-subtitle">
                        {"Project.ly combines AI-assisted discovery with architecture-first engineering to deliver scalable, transparent, and future-ready digital platforms."}
                    </p>
                    <div class="hero-actions">
                        <button class="hero-cta" onclick={launch(launcher.clone())}>
                            {"Start a Project →"}
                        </button>
                    </div>
                </div>
            </section>
            <Footer />
        </div>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let launcher = use_context::<ProjectLauncher>();
    let year = chrono::Utc::now().year();

    html! {
        <footer class="footer-cta">
            <div class="footer-content">
                <h2>
                    {"Ready to build something "}
                    <span class="subtitle">{"exceptional?"}</span>
                </h2>
                <button class="hero-cta" onclick={launch(launcher)}>
                    {"Schedule Consultation"}
                </button>
                <p class="footer-copyright">
                    {format!("© {} Project.ly Inc. All rights reserved.", year)}
                </p>
            </div>
        </footer>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="landing-page">
            <style>{HOME_CSS}</style>
            <section class="hero">
                <div class="hero-content">
                    <h1>{"Nothing here"}</h1>
                    <Link<Route> to={Route::Home} classes="hero-cta">
                        {"Back to the start"}
                    </Link<Route>>
                </div>
            </section>
        </div>
    }
}

const HOME_CSS: &str = r#"
body {
    margin: 0;
    background: #09090b;
    color: white;
    font-family: system-ui, -apple-system, sans-serif;
}
.top-nav {
    position: fixed;
    top: 0;
    left: 0;
    right: 0;
    z-index: 50;
    padding: 1.25rem 0;
    transition: all 0.3s ease;
}
.top-nav.scrolled {
    padding: 0.75rem 0;
    background: rgba(9, 9, 11, 0.8);
    backdrop-filter: blur(12px);
    border-bottom: 1px solid #27272a;
}
.nav-content {
    max-width: 80rem;
    margin: 0 auto;
    padding: 0 1.5rem;
    display: flex;
    align-items: center;
    justify-content: space-between;
}
.nav-logo {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    font-size: 1.25rem;
    font-weight: bold;
    color: white;
    text-decoration: none;
}
.nav-logo-mark {
    width: 2rem;
    height: 2rem;
    border-radius: 6px;
    background: white;
    color: #09090b;
    display: flex;
    align-items: center;
    justify-content: center;
    font-family: monospace;
}
.nav-cta, .hero-cta {
    padding: 0.5rem 1rem;
    border: none;
    border-radius: 9999px;
    background: white;
    color: #18181b;
    font-weight: 600;
    cursor: pointer;
    text-decoration: none;
}
.hero {
    min-height: 100vh;
    display: flex;
    align-items: center;
    padding-top: 5rem;
}
.hero-content {
    max-width: 40rem;
    margin: 0 auto;
    padding: 0 1.5rem;
}
.hero-badge {
    display: inline-flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.25rem 0.75rem;
    margin-bottom: 2rem;
    border-radius: 9999px;
    border: 1px solid #27272a;
    font-family: monospace;
    font-size: 0.75rem;
    color: #a1a1aa;
}
.hero-badge-dot { width: 0.5rem; height: 0.5rem; border-radius: 50%; background: #6366f1; }
.hero h1 { font-size: 3.5rem; line-height: 1.1; margin-bottom: 1.5rem; }
.gradient-text {
    background: linear-gradient(to right, #6366f1, #8b5cf6);
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
}
.hero-subtitle { font-size: 1.25rem; color: #a1a1aa; line-height: 1.6; margin-bottom: 2rem; }
.hero-actions .hero-cta { padding: 0.75rem 1.5rem; border-radius: 8px; }
.footer-cta {
    padding: 6rem 0 3rem;
    border-top: 1px solid #27272a;
}
.footer-content { max-width: 80rem; margin: 0 auto; padding: 0 1.5rem; }
.footer-cta h2 { font-size: 1.5rem; margin-bottom: 1.5rem; }
.footer-cta .subtitle { color: #71717a; }
.footer-cta .hero-cta { padding: 1rem 2rem; border-radius: 8px; font-size: 1.125rem; }
.footer-copyright { margin-top: 1.5rem; font-size: 0.75rem; color: #71717a; }
@media (max-width: 768px) {
    .hero h1 { font-size: 2.5rem; }
}
"#;
