//! Stack definitions that ship with Rampart.
//!
//! These give the CLI something to validate against when no catalog
//! directory is configured. A catalog entry with the same id replaces the
//! built-in definition.

use rampart_core::domain::{StackDefinition, StackId};

/// Every built-in stack, sorted by id.
pub fn all_stacks() -> Vec<StackDefinition> {
    vec![hdp_2_6(), hdp_3_1()]
}

// ── HDP ───────────────────────────────────────────────────────────────────────

const HDP_COMMON_COMPONENTS: &[&str] = &[
    "NAMENODE",
    "SECONDARY_NAMENODE",
    "DATANODE",
    "HDFS_CLIENT",
    "RESOURCEMANAGER",
    "NODEMANAGER",
    "HISTORYSERVER",
    "APP_TIMELINE_SERVER",
    "YARN_CLIENT",
    "MAPREDUCE2_CLIENT",
    "ZOOKEEPER_SERVER",
    "ZOOKEEPER_CLIENT",
    "HIVE_METASTORE",
    "HIVE_SERVER",
    "HIVE_CLIENT",
    "HBASE_MASTER",
    "HBASE_REGIONSERVER",
    "HBASE_CLIENT",
    "KAFKA_BROKER",
    "METRICS_COLLECTOR",
    "METRICS_MONITOR",
];

const HDP_COMMON_CONFIG_TYPES: &[&str] = &[
    "cluster-env",
    "core-site",
    "hdfs-site",
    "hadoop-env",
    "yarn-site",
    "yarn-env",
    "mapred-site",
    "zoo.cfg",
    "zookeeper-env",
    "hive-site",
    "hbase-site",
    "hbase-env",
    "kafka-broker",
    "ams-site",
];

fn hdp_base(version: &str) -> StackDefinition {
    StackDefinition::new(StackId::new("HDP", version))
        .with_components(HDP_COMMON_COMPONENTS.iter().copied())
        .with_config_types(HDP_COMMON_CONFIG_TYPES.iter().copied())
        .with_password("hive-env", "hive_metastore_user_passwd")
        .with_password("ams-grafana-env", "metrics_grafana_password")
}

/// HDP 2.6 still ships Spark 1 and Oozie.
pub fn hdp_2_6() -> StackDefinition {
    hdp_base("2.6")
        .with_components([
            "SPARK_JOBHISTORYSERVER",
            "SPARK_CLIENT",
            "SPARK2_JOBHISTORYSERVER",
            "SPARK2_CLIENT",
            "OOZIE_SERVER",
            "OOZIE_CLIENT",
        ])
        .with_config_types(["spark-defaults", "spark2-defaults", "oozie-site"])
        .with_password("oozie-site", "oozie.service.JPAService.jdbc.password")
}

pub fn hdp_3_1() -> StackDefinition {
    hdp_base("3.1")
        .with_components([
            "SPARK2_JOBHISTORYSERVER",
            "SPARK2_CLIENT",
            "TIMELINE_READER",
            "YARN_REGISTRY_DNS",
            "RANGER_ADMIN",
            "RANGER_USERSYNC",
        ])
        .with_config_types(["spark2-defaults", "yarn-hbase-site"])
        .with_password("ranger-env", "admin_password")
        .with_password("ranger-admin-site", "ranger.jpa.jdbc.password")
}
