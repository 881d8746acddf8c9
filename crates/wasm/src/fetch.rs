use anyhow::{Context, anyhow, bail};
use paper_trails_core::loader::{LoadError, RawResources, Resource};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web_sys::window().context("no window")?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("{e:?}"))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| anyhow!("not a Response"))?;
    if !resp.ok() {
        bail!("HTTP {}", resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow!("{e:?}"))?)
        .await
        .map_err(|e| anyhow!("{e:?}"))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

async fn fetch_resource(base_url: &str, resource: Resource) -> Result<Vec<u8>, LoadError> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), resource.path());
    log::debug!("fetching {url}");
    fetch_bytes(&url)
        .await
        .with_context(|| format!("{resource} from {url}"))
        .map_err(|err| LoadError::Fetch(format!("{err:#}")))
}

/// Fetch the three resources. Failures are carried per resource so one
/// missing file does not block the others.
pub async fn fetch_all(base_url: &str) -> RawResources {
    RawResources {
        people: fetch_resource(base_url, Resource::People).await,
        discoveries: fetch_resource(base_url, Resource::Discoveries).await,
        events: fetch_resource(base_url, Resource::Events).await,
    }
}
