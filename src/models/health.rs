#[derive(Clone)]
pub struct Health {
    pub ok: bool,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthV1 {
    pub ok: bool,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

json_responder!(HealthV1);

impl From<Health> for HealthV1 {
    fn from(state: Health) -> Self {
        Self {
            ok: state.ok,
            started_at: state.started_at,
        }
    }
}
