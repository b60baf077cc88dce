//! Monitor assignment and monitor library command handlers.

use wug_core::{
    ConnectionConfig, Monitor, MonitorType, MonitorTypeMatch, Monitors, Reconciler, Tracked,
    lookup_monitor_type,
};

use crate::cli::{GlobalOpts, MonitorArgs, MonitorCommand, MonitorKind};
use crate::error::CliError;
use crate::output::{self, FieldRow};

use super::util::{self, Identified};

impl From<MonitorKind> for MonitorType {
    fn from(kind: MonitorKind) -> Self {
        match kind {
            MonitorKind::Active => MonitorType::Active,
            MonitorKind::Performance => MonitorType::Performance,
        }
    }
}

fn detail(view: &Identified<'_, Monitor>) -> Vec<FieldRow> {
    let m = view.record;
    let mut rows = vec![
        FieldRow::new("ID", view.id),
        FieldRow::new("Device", &m.device_id),
        FieldRow::new("Type", m.kind),
        FieldRow::optional("Class ID", m.monitor_type_class_id.as_deref()),
        FieldRow::optional("Monitor ID", m.monitor_type_id.as_deref()),
        FieldRow::optional("Monitor", m.monitor_type_name.as_deref()),
        FieldRow::optional("Global", m.is_global),
        FieldRow::optional("Enabled", m.enabled),
    ];
    if let Some(active) = &m.active {
        rows.extend([
            FieldRow::optional("Critical order", active.critical_order),
            FieldRow::optional("Action policy", active.action_policy_name.as_deref()),
            FieldRow::optional("Argument", active.argument.as_deref()),
            FieldRow::optional("Comment", active.comment.as_deref()),
            FieldRow::optional("Poll interval (s)", active.polling_interval_seconds),
            FieldRow::optional("Interface", active.interface_id),
        ]);
    }
    if let Some(performance) = &m.performance {
        rows.push(FieldRow::optional(
            "Poll interval (min)",
            performance.polling_interval_minutes,
        ));
    }
    rows
}

fn lookup_detail(found: &MonitorTypeMatch) -> Vec<FieldRow> {
    vec![
        FieldRow::new("Class ID", &found.class_id),
        FieldRow::new("Monitor", &found.monitor_name),
        FieldRow::new("Monitor ID", &found.monitor_id),
    ]
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    connection: &ConnectionConfig,
    args: MonitorArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MonitorCommand::Create(manifest) => {
            let desired: Monitor = util::read_manifest(&manifest.path)?;
            let reconciler = Reconciler::<Monitors>::new(util::connect(connection).await?);

            let mut tracked = Tracked::absent();
            let (id, observed) = reconciler.create(&mut tracked, &desired).await?;
            util::print_record(global, &id, &observed, detail)
        }

        MonitorCommand::Read { id, manifest } => {
            let id = util::parse_id(&id)?;
            let desired: Monitor = util::read_manifest(&manifest.path)?;
            let reconciler = Reconciler::<Monitors>::new(util::connect(connection).await?);

            let mut tracked = Tracked::existing(id.clone());
            let observation = reconciler.read(&mut tracked, &desired).await?;
            util::print_observation(global, "monitor", &id, &observation, detail)
        }

        MonitorCommand::Update { id, manifest } => {
            let id = util::parse_id(&id)?;
            let desired: Monitor = util::read_manifest(&manifest.path)?;
            let reconciler = Reconciler::<Monitors>::new(util::connect(connection).await?);

            let mut tracked = Tracked::existing(id.clone());
            let observation = reconciler.update(&mut tracked, &desired).await?;
            util::print_observation(global, "monitor", &id, &observation, detail)
        }

        MonitorCommand::Delete { id, device_id } => {
            let id = util::parse_id(&id)?;
            let reconciler = Reconciler::<Monitors>::new(util::connect(connection).await?);

            let mut tracked = Tracked::<Monitor>::existing(id.clone());
            reconciler.delete(&mut tracked, &device_id).await?;
            util::notice(global, &format!("monitor {id} removed from device {device_id}"));
            Ok(())
        }

        MonitorCommand::Lookup { kind, search } => {
            let client = util::connect(connection).await?;
            let found = lookup_monitor_type(&client, kind.into(), &search).await?;
            let out = output::render_single(&global.output, &found, lookup_detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
