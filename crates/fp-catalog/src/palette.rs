//! Sidebar palette loading.

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::wire::Machine;
use fp_editor::{MachineTemplate, Palette};
use std::future::Future;

/// Anything that can list backend machines.
pub trait MachineSource {
    fn list_machines(&self) -> impl Future<Output = Result<Vec<Machine>, CatalogError>> + Send;
}

impl MachineSource for CatalogClient {
    fn list_machines(&self) -> impl Future<Output = Result<Vec<Machine>, CatalogError>> + Send {
        CatalogClient::list_machines(self)
    }
}

impl From<Machine> for MachineTemplate {
    fn from(machine: Machine) -> Self {
        let id = machine
            .id
            .clone()
            .unwrap_or_else(|| machine.name.to_lowercase().replace(' ', "-"));
        Self {
            id,
            name: machine.name,
            machine_id: machine.id,
            multiplier: machine.multiplier,
        }
    }
}

/// Load the palette from the backend, or fall back to the built-in
/// templates when the request fails for any reason.
pub async fn fetch_palette<S: MachineSource>(source: &S) -> Palette {
    match source.list_machines().await {
        Ok(machines) => {
            log::debug!("loaded {} machines from catalog", machines.len());
            Palette::from_backend(machines.into_iter().map(MachineTemplate::from).collect())
        }
        Err(e) => {
            log::warn!("catalog unavailable, using built-in palette: {e}");
            Palette::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_editor::palette::PaletteSource;
    use pretty_assertions::assert_eq;

    struct Fixed(Result<Vec<Machine>, u16>);

    impl MachineSource for Fixed {
        async fn list_machines(&self) -> Result<Vec<Machine>, CatalogError> {
            self.0.clone().map_err(|status| CatalogError::Status {
                status,
                message: "boom".into(),
            })
        }
    }

    fn machine(id: Option<&str>, name: &str) -> Machine {
        Machine {
            id: id.map(str::to_string),
            name: name.to_string(),
            multiplier: 1.5,
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn backend_machines_become_templates() {
        let palette = fetch_palette(&Fixed(Ok(vec![machine(Some("m1"), "Blender")]))).await;
        assert_eq!(palette.source, PaletteSource::Backend);
        assert_eq!(
            palette.templates,
            vec![MachineTemplate {
                id: "m1".into(),
                name: "Blender".into(),
                machine_id: Some("m1".into()),
                multiplier: 1.5,
            }]
        );
    }

    #[tokio::test]
    async fn failure_falls_back_to_builtins() {
        let palette = fetch_palette(&Fixed(Err(500))).await;
        assert_eq!(palette, Palette::fallback());
    }

    #[test]
    fn id_less_machine_gets_slug() {
        let template = MachineTemplate::from(machine(None, "Particle Accelerator"));
        assert_eq!(template.id, "particle-accelerator");
        assert_eq!(template.machine_id, None);
    }
}
