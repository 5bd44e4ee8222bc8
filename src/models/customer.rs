use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub fname: String,
    pub lname: Option<String>,
    #[serde(default)]
    pub membership_status: bool,
}

impl Customer {
    pub fn option_label(&self) -> String {
        format!(
            "{} — {} {}",
            self.customer_id,
            self.fname,
            self.lname.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}
