use player::Overrides;
use web_sys::window;

/// Reads overrides such as `?volume=30&track=7` from the page url.
pub fn overrides() -> Result<Overrides, String> {
    let location = window()
        .ok_or_else(|| "failed to get window".to_string())?
        .location();

    let href = location
        .href()
        .map_err(|e| format!("failed to get href: {e:?}"))?;

    let url = url::Url::parse(&href).map_err(|e| format!("Failed to parse url: {e}"))?;

    Ok(Overrides::from_pairs(url.query_pairs()))
}
