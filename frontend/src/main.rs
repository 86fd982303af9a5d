use yew::prelude::*;
use yew_router::prelude::*;
use yew_hooks::prelude::*;
use log::{info, Level};
use web_sys::MouseEvent;

mod config;
mod contact;
mod pages {
    pub mod home;
}

use contact::view::ContactWizard;
use pages::home::{Home, NotFound};

/// Lets any section below `App` open the contact wizard.
#[derive(Clone, PartialEq)]
pub struct ProjectLauncher(pub Callback<()>);

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}


#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub on_start_project: Callback<()>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let (_, scroll_y) = use_window_scroll();
    let is_scrolled = scroll_y > 20.0;

    let start_project = {
        let on_start_project = props.on_start_project.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_start_project.emit(());
        })
    };

    html! {
        <nav class={classes!("top-nav", is_scrolled.then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    <span class="nav-logo-mark">{"P"}</span>
                    {"Project.ly"}
                </Link<Route>>
                <button class="nav-cta" onclick={start_project}>
                    {"Start a Project →"}
                </button>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    let wizard_open = use_state(|| false);

    let open_wizard = {
        let wizard_open = wizard_open.clone();
        Callback::from(move |_| {
            info!("Opening contact wizard");
            wizard_open.set(true);
        })
    };

    let close_wizard = {
        let wizard_open = wizard_open.clone();
        Callback::from(move |_| wizard_open.set(false))
    };

    html! {
        <ContextProvider<ProjectLauncher> context={ProjectLauncher(open_wizard.clone())}>
            <BrowserRouter>
                <Nav on_start_project={open_wizard} />
                <Switch<Route> render={switch} />
            </BrowserRouter>
            <ContactWizard is_open={*wizard_open} on_close={close_wizard} />
        </ContextProvider<ProjectLauncher>>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
