//! Device command handlers.

use wug_core::{ConnectionConfig, Device, Devices, Reconciler, Tracked};

use crate::cli::{DeviceArgs, DeviceCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::FieldRow;

use super::util::{self, Identified};

fn detail(view: &Identified<'_, Device>) -> Vec<FieldRow> {
    let d = view.record;
    vec![
        FieldRow::new("ID", view.id),
        FieldRow::new("Name", &d.name),
        FieldRow::new("Options", d.options),
        FieldRow::new(
            "Groups",
            util::join_or_dash(d.groups.iter().map(|g| g.name.as_str())),
        ),
        FieldRow::new(
            "Interfaces",
            util::join_or_dash(d.interfaces.iter().map(|i| {
                if i.default {
                    format!("{} (default)", i.network_address)
                } else {
                    i.network_address.clone()
                }
            })),
        ),
        FieldRow::new(
            "Credentials",
            util::join_or_dash(d.credentials.iter().map(|c| format!("{}:{}", c.kind, c.name))),
        ),
        FieldRow::new(
            "Active monitors",
            util::join_or_dash(d.active_monitors.iter().map(|m| m.name.as_str())),
        ),
        FieldRow::new(
            "Performance monitors",
            util::join_or_dash(d.performance_monitors.iter().map(|m| m.name.as_str())),
        ),
        FieldRow::optional("Type", d.device_type.as_deref()),
        FieldRow::optional("SNMP OID", d.snmp_oid.as_deref()),
        FieldRow::optional("Primary role", d.primary_role.as_deref()),
        FieldRow::new("Subroles", util::join_or_dash(&d.sub_roles)),
        FieldRow::optional("OS", d.os.as_deref()),
        FieldRow::optional("Brand", d.brand.as_deref()),
        FieldRow::optional("Action policy", d.action_policy.as_deref()),
    ]
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    connection: &ConnectionConfig,
    args: DeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DeviceCommand::Create(manifest) => {
            let desired: Device = util::read_manifest(&manifest.path)?;
            let reconciler = Reconciler::<Devices>::new(util::connect(connection).await?);

            let mut tracked = Tracked::absent();
            let (id, observed) = reconciler.create(&mut tracked, &desired).await?;
            util::print_record(global, &id, &observed, detail)
        }

        DeviceCommand::Read { id, manifest } => {
            let id = util::parse_id(&id)?;
            let desired: Device = util::read_manifest(&manifest.path)?;
            let reconciler = Reconciler::<Devices>::new(util::connect(connection).await?);

            let mut tracked = Tracked::existing(id.clone());
            let observation = reconciler.read(&mut tracked, &desired).await?;
            util::print_observation(global, "device", &id, &observation, detail)
        }

        DeviceCommand::Update { id, manifest } => {
            let id = util::parse_id(&id)?;
            let desired: Device = util::read_manifest(&manifest.path)?;
            let reconciler = Reconciler::<Devices>::new(util::connect(connection).await?);

            let mut tracked = Tracked::existing(id.clone());
            let observation = reconciler.update(&mut tracked, &desired).await?;
            util::print_observation(global, "device", &id, &observation, detail)
        }

        DeviceCommand::Delete { id } => {
            let id = util::parse_id(&id)?;
            let reconciler = Reconciler::<Devices>::new(util::connect(connection).await?);

            let mut tracked = Tracked::<Device>::existing(id.clone());
            reconciler.delete(&mut tracked, &()).await?;
            util::notice(global, &format!("device {id} deleted"));
            Ok(())
        }
    }
}
