use orbis_shared::FeatureCollection;

/// Fetch the country dataset from `url`.
pub async fn fetch_features(url: &str) -> Result<FeatureCollection, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<FeatureCollection>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}
