// Supabase project the contact wizard writes to. Both values are baked in at
// build time, e.g. `SUPABASE_URL=... SUPABASE_ANON_KEY=... trunk build --release`.

#[cfg(debug_assertions)]
pub fn get_supabase_url() -> &'static str {
    match option_env!("SUPABASE_URL") {
        Some(url) => url,
        None => "http://localhost:54321", // supabase start
    }
}

#[cfg(not(debug_assertions))]
pub fn get_supabase_url() -> &'static str {
    option_env!("SUPABASE_URL").unwrap_or("")
}

pub fn get_supabase_anon_key() -> &'static str {
    option_env!("SUPABASE_ANON_KEY").unwrap_or("")
}
