use crate::state::AppState;
use axum::{extract::State, response::Html};
use tracing::instrument;

#[instrument(skip_all, name = "api_index")]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
<head><title>PowerDNS PBDNSMessage stats exporter</title></head>
<body>
<h1>PowerDNS PBDNSMessage stats exporter</h1>
<p><a href="{}">Metrics</a></p>
</body>
</html>"#,
        state.metrics_path
    ))
}
