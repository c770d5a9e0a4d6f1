use artifact_core::MeshAsset;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch `url` and return the body bytes.
pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::SameOrigin);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| anyhow::anyhow!("request {url}: {:?}", e))?;
    let resp_val = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?;
    let resp: web::Response = resp_val
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {url}: not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: HTTP {}", resp.status());
    }
    let buf = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?;
    let buf = JsFuture::from(buf)
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: body: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and parse the artifact mesh. Failures are logged and yield `None`;
/// the scene then renders with unit scale and no model.
pub async fn load_mesh(url: &str) -> Option<MeshAsset> {
    let bytes = match fetch_bytes(url).await {
        Ok(b) => b,
        Err(e) => {
            log::warn!("[mesh] {e:#}");
            return None;
        }
    };
    match MeshAsset::from_stl(&bytes) {
        Ok(mesh) => {
            log::info!(
                "[mesh] loaded {} triangles from {url} ({} bytes)",
                mesh.triangle_count(),
                bytes.len()
            );
            Some(mesh)
        }
        Err(e) => {
            log::warn!("[mesh] {url}: {e}");
            None
        }
    }
}
