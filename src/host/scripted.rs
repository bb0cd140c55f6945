//! Closure-backed host objects
//!
//! [`ScriptedObject`] is a [`HostObject`] whose members are declared up front
//! with a builder. Host adapters use it to expose a snapshot of an external
//! terminal, and tests use it to reproduce the shapes of different host
//! versions.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{ArgKind, HostFault, HostObject, MethodSig, ObjectRef, Value, Visibility};

type Handler = Arc<dyn Fn(&[Value]) -> Result<Value, HostFault> + Send + Sync>;

struct MethodEntry {
    level: usize,
    visibility: Visibility,
    name: String,
    params: Vec<ArgKind>,
    handler: Handler,
}

struct FieldEntry {
    level: usize,
    name: String,
    value: Value,
}

/// A host object assembled from closures and stored values
pub struct ScriptedObject {
    types: Vec<String>,
    methods: Vec<MethodEntry>,
    fields: Mutex<Vec<FieldEntry>>,
    children: Mutex<Vec<ObjectRef>>,
}

impl ScriptedObject {
    /// Start building an object of the given concrete type
    pub fn builder(type_name: impl Into<String>) -> ScriptedObjectBuilder {
        ScriptedObjectBuilder {
            types: vec![type_name.into()],
            methods: Vec::new(),
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a nested component after construction (allows cycles).
    pub fn push_child(&self, child: ObjectRef) {
        lock(&self.children).push(child);
    }

    /// Set or replace a field after construction.
    pub fn set_field(&self, level: usize, name: impl Into<String>, value: Value) {
        let name = name.into();
        let mut fields = lock(&self.fields);
        match fields.iter_mut().find(|f| f.level == level && f.name == name) {
            Some(entry) => entry.value = value,
            None => fields.push(FieldEntry { level, name, value }),
        }
    }
}

impl HostObject for ScriptedObject {
    fn type_chain(&self) -> &[String] {
        &self.types
    }

    fn children(&self) -> Vec<ObjectRef> {
        lock(&self.children).clone()
    }

    fn call(
        &self,
        level: usize,
        visibility: Visibility,
        sig: &MethodSig<'_>,
        args: &[Value],
    ) -> Option<Result<Value, HostFault>> {
        let entry = self.methods.iter().find(|m| {
            m.level == level
                && m.visibility == visibility
                && m.name == sig.name
                && m.params.as_slice() == sig.params
        })?;
        Some((entry.handler)(args))
    }

    fn field(&self, level: usize, name: &str) -> Option<Value> {
        lock(&self.fields)
            .iter()
            .find(|f| f.level == level && f.name == name)
            .map(|f| f.value.clone())
    }
}

/// Builder for [`ScriptedObject`]
pub struct ScriptedObjectBuilder {
    types: Vec<String>,
    methods: Vec<MethodEntry>,
    fields: Vec<FieldEntry>,
    children: Vec<ObjectRef>,
}

impl ScriptedObjectBuilder {
    /// Add the next ancestor in the type chain
    pub fn extends(mut self, type_name: impl Into<String>) -> Self {
        self.types.push(type_name.into());
        self
    }

    /// Declare a method at any level and visibility
    pub fn method_at<F>(
        mut self,
        level: usize,
        visibility: Visibility,
        name: impl Into<String>,
        params: &[ArgKind],
        handler: F,
    ) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HostFault> + Send + Sync + 'static,
    {
        self.methods.push(MethodEntry {
            level,
            visibility,
            name: name.into(),
            params: params.to_vec(),
            handler: Arc::new(handler),
        });
        self
    }

    /// Public method declared on the concrete type
    pub fn method<F>(self, name: impl Into<String>, params: &[ArgKind], handler: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HostFault> + Send + Sync + 'static,
    {
        self.method_at(0, Visibility::Public, name, params, handler)
    }

    /// Non-public method declared on the concrete type
    pub fn hidden_method<F>(self, name: impl Into<String>, params: &[ArgKind], handler: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HostFault> + Send + Sync + 'static,
    {
        self.method_at(0, Visibility::Hidden, name, params, handler)
    }

    /// Public zero-argument method that always returns `value`
    pub fn getter(self, name: impl Into<String>, value: Value) -> Self {
        self.method(name, &[], move |_| Ok(value.clone()))
    }

    /// Field declared on the concrete type
    pub fn field(self, name: impl Into<String>, value: Value) -> Self {
        self.field_at(0, name, value)
    }

    /// Field declared by an ancestor
    pub fn field_at(mut self, level: usize, name: impl Into<String>, value: Value) -> Self {
        self.fields.push(FieldEntry {
            level,
            name: name.into(),
            value,
        });
        self
    }

    pub fn child(mut self, child: ObjectRef) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> Arc<ScriptedObject> {
        Arc::new(ScriptedObject {
            types: self.types,
            methods: self.methods,
            fields: Mutex::new(self.fields),
            children: Mutex::new(self.children),
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
