use chrono::{Datelike, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    adapters::{AnyOrder, SpecializedOrder},
    auth::{visible_navigation, Action, Module, NavItem, RbacService, Role},
    config::AppConfig,
    errors::ServiceError,
    events::{Event, EventLog, EventRecord},
    models::{
        orders::{SharedOrderFields, DEFAULT_MOVEMENT_STATUS},
        personal_file::{NewPersonalFile, PersonalFile},
        work_order::{NewWorkOrder, OrderType, WorkOrder, WorkOrderPatch, WorkOrderStatus},
    },
    seed,
    services::{
        order_status::{StatusTransitionPolicy, TransitionMode},
        validation::validate_input,
    },
};

/// In-memory container for one dashboard session.
///
/// Collections are replaced wholesale on every mutation, so snapshots handed
/// out earlier never change under the reader.
#[derive(Debug, Clone)]
pub struct Dashboard {
    role: Role,
    rbac: RbacService,
    transitions: StatusTransitionPolicy,
    retain_payloads: bool,
    created_by: String,
    personal_files: Arc<Vec<PersonalFile>>,
    work_orders: Arc<Vec<WorkOrder>>,
    /// Last saved specialized payload per work order id
    retained: HashMap<String, serde_json::Value>,
    events: EventLog,
}

impl Dashboard {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            rbac: RbacService::new(),
            transitions: StatusTransitionPolicy::default(),
            retain_payloads: false,
            created_by: "operator".to_string(),
            personal_files: Arc::new(Vec::new()),
            work_orders: Arc::new(Vec::new()),
            retained: HashMap::new(),
            events: EventLog::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let dashboard = Self::new(config.default_role)
            .with_transition_mode(config.status_transitions)
            .with_payload_retention(config.retain_specialized_payloads)
            .with_author(config.created_by.clone());
        if config.seed_demo_data {
            dashboard.with_seed_data()
        } else {
            dashboard
        }
    }

    pub fn with_transition_mode(mut self, mode: TransitionMode) -> Self {
        self.transitions = StatusTransitionPolicy::new(mode);
        self
    }

    pub fn with_payload_retention(mut self, retain: bool) -> Self {
        self.retain_payloads = retain;
        self
    }

    pub fn with_author(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    pub fn with_rbac(mut self, rbac: RbacService) -> Self {
        self.rbac = rbac;
        self
    }

    pub fn with_seed_data(mut self) -> Self {
        self.personal_files = Arc::new(seed::demo_personal_files());
        self.work_orders = Arc::new(seed::demo_work_orders());
        self
    }

    // ---- role and navigation ----

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        if role == self.role {
            return;
        }
        info!(from = %self.role, to = %role, "role changed");
        self.events.push(Event::RoleChanged {
            from: self.role,
            to: role,
        });
        self.role = role;
    }

    pub fn can(&self, module: Module, action: Action) -> bool {
        self.rbac.check(self.role, module, action)
    }

    pub fn navigation(&self) -> Vec<NavItem> {
        visible_navigation(self.role)
    }

    // ---- personal files ----

    pub fn personal_files(&self) -> Result<Arc<Vec<PersonalFile>>, ServiceError> {
        self.rbac.require(self.role, Module::PersonalFile, Action::View)?;
        Ok(Arc::clone(&self.personal_files))
    }

    #[instrument(skip(self, input), fields(role = %self.role))]
    pub fn add_personal_file(
        &mut self,
        input: NewPersonalFile,
    ) -> Result<PersonalFile, ServiceError> {
        self.rbac.require(self.role, Module::PersonalFile, Action::Create)?;
        validate_input(&input)?;
        if self
            .personal_files
            .iter()
            .any(|f| f.file_number == input.file_number)
        {
            return Err(ServiceError::field(
                "file_number",
                "Личное дело с таким номером уже существует",
            ));
        }

        let file = PersonalFile {
            id: Uuid::new_v4().to_string(),
            file_number: input.file_number,
            client_name: input.client_name,
            birth_date: input.birth_date,
            disability_group: input.disability_group,
            disability_category: input.disability_category,
            address: input.address,
            phone: input.phone,
            created_at: Utc::now(),
        };

        let mut next = Vec::with_capacity(self.personal_files.len() + 1);
        next.extend(self.personal_files.iter().cloned());
        next.push(file.clone());
        self.personal_files = Arc::new(next);

        info!(id = %file.id, "personal file created");
        self.events.push(Event::PersonalFileCreated { id: file.id.clone() });
        Ok(file)
    }

    // ---- generic work orders ----

    /// Snapshot of every work order regardless of role
    pub fn work_orders(&self) -> Arc<Vec<WorkOrder>> {
        Arc::clone(&self.work_orders)
    }

    /// Work orders whose module the current role can view
    pub fn visible_work_orders(&self) -> Vec<WorkOrder> {
        self.work_orders
            .iter()
            .filter(|o| self.can(o.order_type.module(), Action::View))
            .cloned()
            .collect()
    }

    pub fn work_order(&self, id: &str) -> Result<WorkOrder, ServiceError> {
        let order = self.find(id)?;
        self.rbac.require(self.role, order.order_type.module(), Action::View)?;
        Ok(order)
    }

    #[instrument(skip(self, input), fields(role = %self.role, order_type = %input.order_type))]
    pub fn new_work_order(&mut self, input: NewWorkOrder) -> Result<WorkOrder, ServiceError> {
        self.rbac.require(self.role, input.order_type.module(), Action::Create)?;
        validate_input(&input)?;
        self.ensure_personal_file(&input.personal_file_id)?;

        let now = Utc::now();
        let order = WorkOrder {
            id: String::new(),
            order_number: String::new(),
            order_date: input.order_date,
            personal_file_id: input.personal_file_id,
            client_name: input.client_name,
            disability_group: input.disability_group,
            disability_category: input.disability_category,
            product_name: input.product_name,
            manufacturing_date: input.manufacturing_date,
            issue_date: input.issue_date,
            movement_status: DEFAULT_MOVEMENT_STATUS.to_string(),
            status: WorkOrderStatus::Registration,
            order_type: input.order_type,
            measurements: input.measurements,
            notes: input.notes,
            created_by: self.created_by.clone(),
            created_at: now,
            updated_at: now,
            workflow: input.workflow,
        };
        Ok(self.insert_work_order(order))
    }

    /// Add a complete record; blank id and order number are generated
    #[instrument(skip(self, order), fields(role = %self.role, order_type = %order.order_type))]
    pub fn add_work_order(&mut self, order: WorkOrder) -> Result<WorkOrder, ServiceError> {
        self.rbac.require(self.role, order.order_type.module(), Action::Create)?;
        validate_input(&order)?;
        self.ensure_personal_file(&order.personal_file_id)?;
        if !order.id.is_empty() && self.work_orders.iter().any(|o| o.id == order.id) {
            return Err(ServiceError::InvalidInput(format!(
                "work order {} already exists",
                order.id
            )));
        }
        if !order.order_number.is_empty() {
            self.ensure_unique_number(&order.order_number, None)?;
        }
        Ok(self.insert_work_order(order))
    }

    #[instrument(skip(self, patch), fields(role = %self.role))]
    pub fn update_work_order(
        &mut self,
        id: &str,
        patch: WorkOrderPatch,
    ) -> Result<WorkOrder, ServiceError> {
        let current = self.find(id)?;
        self.rbac.require(self.role, current.order_type.module(), Action::Edit)?;
        if let Some(file_id) = &patch.personal_file_id {
            self.ensure_personal_file(file_id)?;
        }
        if let Some(number) = &patch.order_number {
            self.ensure_unique_number(number, Some(id))?;
        }
        if let Some(status) = patch.status {
            self.transitions.check(current.status, status)?;
        }

        let updated = patch.apply(&current, Utc::now());
        validate_input(&updated)?;
        self.work_orders = Arc::new(
            self.work_orders
                .iter()
                .map(|o| if o.id == id { updated.clone() } else { o.clone() })
                .collect(),
        );

        info!(id, "work order updated");
        self.events.push(Event::WorkOrderUpdated { id: id.to_string() });
        if updated.status != current.status {
            self.events.push(Event::WorkOrderStatusChanged {
                id: id.to_string(),
                old_status: current.status,
                new_status: updated.status,
            });
        }
        Ok(updated)
    }

    pub fn transition_status(
        &mut self,
        id: &str,
        status: WorkOrderStatus,
    ) -> Result<WorkOrder, ServiceError> {
        self.update_work_order(id, WorkOrderPatch::status(status))
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub fn delete_work_order(&mut self, id: &str) -> Result<(), ServiceError> {
        let current = self.find(id)?;
        self.rbac.require(self.role, current.order_type.module(), Action::Delete)?;

        self.work_orders = Arc::new(
            self.work_orders
                .iter()
                .filter(|o| o.id != id)
                .cloned()
                .collect(),
        );
        self.retained.remove(id);

        info!(id, "work order deleted");
        self.events.push(Event::WorkOrderDeleted {
            id: id.to_string(),
            order_type: current.order_type,
        });
        Ok(())
    }

    // ---- specialized views ----

    /// Every visible work order through the adapter its type selects
    pub fn all_specialized(&self) -> Vec<AnyOrder> {
        self.work_orders
            .iter()
            .filter(|o| self.can(o.order_type.module(), Action::View))
            .filter_map(|o| self.any_view_of(o))
            .collect()
    }

    /// Adapted orders of one type, chosen at runtime
    pub fn specialized_of_type(
        &self,
        order_type: OrderType,
    ) -> Result<Vec<AnyOrder>, ServiceError> {
        self.rbac.require(self.role, order_type.module(), Action::View)?;
        Ok(self
            .work_orders
            .iter()
            .filter(|o| o.order_type == order_type)
            .filter_map(|o| self.any_view_of(o))
            .collect())
    }

    /// Work orders of type `T`, adapted
    pub fn specialized_orders<T: SpecializedOrder>(&self) -> Result<Vec<T>, ServiceError> {
        self.rbac.require(self.role, T::module(), Action::View)?;
        Ok(self
            .work_orders
            .iter()
            .filter_map(|o| self.view_of::<T>(o))
            .collect())
    }

    pub fn specialized_order<T: SpecializedOrder>(&self, id: &str) -> Result<T, ServiceError> {
        self.rbac.require(self.role, T::module(), Action::View)?;
        let order = self.find(id)?;
        self.view_of::<T>(&order)
            .ok_or(ServiceError::OrderTypeMismatch {
                expected: T::ORDER_TYPE,
                found: order.order_type,
            })
    }

    #[instrument(skip(self, order), fields(role = %self.role, order_type = %T::ORDER_TYPE))]
    pub fn create_specialized<T: SpecializedOrder>(&mut self, order: T) -> Result<T, ServiceError> {
        self.rbac.require(self.role, T::module(), Action::Create)?;
        validate_input(&order)?;

        let now = Utc::now();
        let mut generic = order.project_to_work_order();
        generic.created_by = self.created_by.clone();
        generic.created_at = now;
        generic.updated_at = now;

        let created = self.add_work_order(generic)?;
        if self.retain_payloads {
            self.retain(order, &created)?;
        }
        self.adapted(&created)
    }

    /// Save an edited view. Without payload retention only the shared fields
    /// reach the work order; status, measurements and the payload are reset.
    #[instrument(skip(self, order), fields(role = %self.role, id = %order.id()))]
    pub fn update_specialized<T: SpecializedOrder>(&mut self, order: T) -> Result<T, ServiceError> {
        let id = order.id().to_string();
        let current = self.find(&id)?;
        if current.order_type != T::ORDER_TYPE {
            return Err(ServiceError::OrderTypeMismatch {
                expected: T::ORDER_TYPE,
                found: current.order_type,
            });
        }
        self.rbac.require(self.role, T::module(), Action::Edit)?;
        validate_input(&order)?;

        let mut patch = WorkOrderPatch::from(order.project_to_work_order());
        if self.transitions.mode() == TransitionMode::Strict {
            // status only moves through transition_status under the stage table
            debug!(id = %id, "dropping projected status under strict transitions");
            patch.status = None;
        }
        let updated = self.update_work_order(&id, patch)?;
        if self.retain_payloads {
            self.retain(order, &updated)?;
        }
        self.adapted(&updated)
    }

    pub fn delete_specialized<T: SpecializedOrder>(
        &mut self,
        id: &str,
    ) -> Result<(), ServiceError> {
        let current = self.find(id)?;
        if current.order_type != T::ORDER_TYPE {
            return Err(ServiceError::OrderTypeMismatch {
                expected: T::ORDER_TYPE,
                found: current.order_type,
            });
        }
        self.delete_work_order(id)
    }

    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        self.events.drain()
    }

    // ---- internals ----

    fn find(&self, id: &str) -> Result<WorkOrder, ServiceError> {
        self.work_orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", id)))
    }

    fn ensure_personal_file(&self, id: &str) -> Result<(), ServiceError> {
        if self.personal_files.iter().any(|f| f.id == id) {
            Ok(())
        } else {
            Err(ServiceError::field("personal_file_id", "Личное дело не найдено"))
        }
    }

    /// Order numbers are unique across every order type
    fn ensure_unique_number(
        &self,
        number: &str,
        except_id: Option<&str>,
    ) -> Result<(), ServiceError> {
        let taken = self
            .work_orders
            .iter()
            .any(|o| o.order_number == number && Some(o.id.as_str()) != except_id);
        if taken {
            return Err(ServiceError::field(
                "order_number",
                "Заказ с таким номером уже существует",
            ));
        }
        Ok(())
    }

    fn insert_work_order(&mut self, mut order: WorkOrder) -> WorkOrder {
        if order.id.is_empty() {
            order.id = Uuid::new_v4().to_string();
        }
        if order.order_number.is_empty() {
            order.order_number = self.next_order_number(order.order_type, order.order_date);
        }

        let mut next = Vec::with_capacity(self.work_orders.len() + 1);
        next.extend(self.work_orders.iter().cloned());
        next.push(order.clone());
        self.work_orders = Arc::new(next);

        info!(id = %order.id, number = %order.order_number, "work order created");
        self.events.push(Event::WorkOrderCreated {
            id: order.id.clone(),
            order_type: order.order_type,
        });
        order
    }

    /// `<prefix>-<year>-<seq>`, one past the highest number currently stored
    fn next_order_number(&self, order_type: OrderType, date: NaiveDate) -> String {
        let prefix = format!("{}-{}-", order_type.number_prefix(), date.year());
        let last = self
            .work_orders
            .iter()
            .filter_map(|o| o.order_number.strip_prefix(prefix.as_str()))
            .filter_map(|tail| tail.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{}{:04}", prefix, last + 1)
    }

    /// Forward-adapt, overlaying a retained payload when there is one
    fn view_of<T: SpecializedOrder>(&self, order: &WorkOrder) -> Option<T> {
        let fresh = T::from_work_order(order)?;
        if !self.retain_payloads {
            return Some(fresh);
        }
        let stored = self
            .retained
            .get(&order.id)
            .and_then(|value| serde_json::from_value::<T>(value.clone()).ok());
        match stored {
            Some(mut stored) => {
                *stored.common_mut() = fresh.common().clone();
                Some(stored)
            }
            None => Some(fresh),
        }
    }

    fn any_view_of(&self, order: &WorkOrder) -> Option<AnyOrder> {
        match order.order_type {
            OrderType::Prosthesis => self.view_of(order).map(AnyOrder::Prosthesis),
            OrderType::Footwear => self.view_of(order).map(AnyOrder::Footwear),
            OrderType::Ottobock => self.view_of(order).map(AnyOrder::Ottobock),
            OrderType::Orthosis => self.view_of(order).map(AnyOrder::Orthosis),
            OrderType::Repair => self.view_of(order).map(AnyOrder::Repair),
            OrderType::ReadyPoi => self.view_of(order).map(AnyOrder::ReadyPoi),
        }
    }

    fn adapted<T: SpecializedOrder>(&self, order: &WorkOrder) -> Result<T, ServiceError> {
        self.view_of::<T>(order)
            .ok_or(ServiceError::OrderTypeMismatch {
                expected: T::ORDER_TYPE,
                found: order.order_type,
            })
    }

    fn retain<T: SpecializedOrder>(
        &mut self,
        mut order: T,
        saved: &WorkOrder,
    ) -> Result<(), ServiceError> {
        *order.common_mut() = SharedOrderFields::from_work_order(saved);
        let value = serde_json::to_value(&order).map_err(|e| {
            ServiceError::InvalidInput(format!("cannot store order payload: {}", e))
        })?;
        self.retained.insert(saved.id.clone(), value);
        Ok(())
    }
}
