use env_binder::{
    BindError, Binder, ConversionCause, Load, MapEnv, Record, ValueType, bind, define_config,
};

define_config! {
    #[derive(Debug, Default, PartialEq)]
    pub struct ServiceConfig {
        #[field(env = "PORT")]
        pub port: isize,

        #[field(env = "NAME")]
        pub name: String,
    }
}

define_config! {
    #[derive(Debug, Default, PartialEq)]
    pub struct AllTypesConfig {
        #[field(env = "PORT")]
        pub port: isize,
        #[field(env = "NAME")]
        pub name: String,
        #[field(env = "ID")]
        pub id: i8,
        #[field(env = "ROW")]
        pub row: i16,
        #[field(env = "TOTAL")]
        pub total: i32,
        #[field(env = "REFERENCE")]
        pub reference: i64,
        #[field(env = "AVERAGE")]
        pub average: f32,
        #[field(env = "PERCENT")]
        pub percent: f64,
        #[field(env = "IS_DEFAULT")]
        pub is_default: bool,
    }
}

define_config! {
    #[derive(Debug, Default)]
    pub struct DefaultConfig {
        #[field(env = "PORT", default = "5000")]
        pub port: isize,
        #[field(env = "NAME")]
        pub name: String,
        #[field(env = "ID")]
        pub id: i32,
        #[field(env = "AVERAGE")]
        pub average: i32,
        #[field(env = "PLACE", default = "Bangalore")]
        pub place: String,
    }
}

define_config! {
    #[derive(Debug, Default)]
    pub struct UnsupportedConfig {
        #[field(env = "DEFAULT")]
        pub is_default: u32,
        #[field(env = "NAME")]
        pub name: String,
    }
}

define_config! {
    #[derive(Debug, Default)]
    pub struct PartlyBoundConfig {
        #[field(env = "PORT")]
        pub port: i32,
        // Not part of the schema
        pub computed: i32,
    }
}

#[test]
fn test_binds_port_and_name() {
    let env = MapEnv::new().set("PORT", "5000").set("NAME", "svc");
    let mut config = ServiceConfig::default();

    bind(&mut config, &ServiceConfig::schema(), &env).unwrap();

    assert_eq!(
        config,
        ServiceConfig {
            port: 5000,
            name: "svc".to_string(),
        }
    );
}

#[test]
fn test_binds_all_supported_types() {
    let env = MapEnv::new()
        .set("PORT", "5000")
        .set("NAME", "envParser")
        .set("ID", "14")
        .set("ROW", "2")
        .set("TOTAL", "87")
        .set("REFERENCE", "6152")
        .set("AVERAGE", "61.45")
        .set("PERCENT", "86.74")
        .set("IS_DEFAULT", "false");

    let config = AllTypesConfig::load_from(&env).unwrap();

    assert_eq!(config.port, 5000);
    assert_eq!(config.name, "envParser");
    assert_eq!(config.id, 14i8);
    assert_eq!(config.row, 2i16);
    assert_eq!(config.total, 87i32);
    assert_eq!(config.reference, 6152i64);
    assert_eq!(config.average, 61.45f32);
    assert_eq!(config.percent, 86.74);
    assert!(!config.is_default);
}

#[test]
fn test_conversion_error_leaves_zero_value() {
    let env = MapEnv::new().set("PORT", "5a");
    let mut config = ServiceConfig::default();

    let errors = bind(&mut config, &ServiceConfig::schema(), &env).unwrap_err();

    assert_eq!(errors.len(), 1);
    match &errors[0] {
        BindError::Conversion {
            field,
            raw,
            declared,
            source: ConversionCause::Int(_),
        } => {
            assert_eq!(*field, "port");
            assert_eq!(raw, "5a");
            assert_eq!(*declared, ValueType::ISIZE);
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
    assert_eq!(config.port, 0);
}

#[test]
fn test_wrong_values_are_all_reported() {
    let env = MapEnv::new()
        .set("PORT", "5a")
        .set("PERCENT", "5a.23")
        .set("IS_DEFAULT", "not false");

    let errors = AllTypesConfig::load_from(&env).unwrap_err();

    let fields: Vec<_> = errors.iter().filter_map(BindError::field).collect();
    assert_eq!(fields, ["port", "percent", "is_default"]);
}

#[test]
fn test_default_values() {
    let env = MapEnv::new().set("ID", "14");

    let config = DefaultConfig::load_from(&env).unwrap();

    assert_eq!(config.port, 5000);
    assert_eq!(config.name, "");
    assert_eq!(config.id, 14);
    assert_eq!(config.average, 0);
    assert_eq!(config.place, "Bangalore");
}

#[test]
fn test_missing_variables_keep_zero_values() {
    let env = MapEnv::new().set("PORT", "5000");

    let config = AllTypesConfig::load_from(&env).unwrap();

    assert_eq!(
        config,
        AllTypesConfig {
            port: 5000,
            ..AllTypesConfig::default()
        }
    );
}

#[test]
fn test_unsupported_type() {
    let env = MapEnv::new().set("DEFAULT", "321").set("NAME", "svc");
    let mut config = UnsupportedConfig::default();

    let errors = bind(&mut config, &UnsupportedConfig::schema(), &env).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "env: is_default: u32 is not a supported type"
    );
    assert_eq!(config.is_default, 0);
    assert_eq!(config.name, "svc");
}

#[test]
fn test_fields_without_attribute_are_not_bound() {
    let schema = PartlyBoundConfig::schema();
    assert_eq!(schema.len(), 1);

    let mut config = PartlyBoundConfig {
        port: 0,
        computed: 7,
    };
    bind(&mut config, &schema, &MapEnv::new().set("PORT", "1").set("COMPUTED", "2")).unwrap();

    assert_eq!(config.port, 1);
    assert_eq!(config.computed, 7);
}

#[test]
fn test_fail_fast_binder() {
    let env = MapEnv::new().set("PORT", "x").set("ID", "y");
    let mut config = AllTypesConfig::default();

    let errors = Binder::new()
        .fail_fast(true)
        .bind(&mut config, &AllTypesConfig::schema(), &env)
        .unwrap_err();

    assert_eq!(errors.len(), 1);
}

#[test]
fn test_custom_schema_for_generated_record() {
    let schema = env_binder::Schema::new().field(
        env_binder::FieldDescriptor::new("name", "SERVICE_NAME", ValueType::STRING)
            .with_default("fallback"),
    );
    let mut config = ServiceConfig::default();

    bind(&mut config, &schema, &MapEnv::new().set("NAME", "ignored")).unwrap();

    assert_eq!(config.name, "fallback");
    assert_eq!(config.port, 0);
}
