//! Palo Alto Networks NGFW CSV syslog messages.
//!
//! PAN-OS logs are quoted CSV records whose fourth field names the log
//! type; the type selects the column names for the rest of the record.
//! The type table is a stable external contract - the recognised types and
//! the exact name sequence per type determine downstream column names.
//! See the PAN-OS syslog field descriptions:
//! <https://docs.paloaltonetworks.com/pan-os/latest/pan-os-admin/monitoring/use-syslog-for-monitoring/syslog-field-descriptions>
use super::cache::ParseCache;
use super::MessagePlugin;
use crate::message::SyslogMessage;
use serde_json::{Map, Value};

static TRAFFIC_FIELDS: &[&str] = &[
    "future_use1",
    "receive_time",
    "serial_number",
    "type",
    "threat_content_type",
    "future_use2",
    "generated_time",
    "source_address",
    "destination_address",
    "nat_source_ip",
    "nat_destination_ip",
    "rule_name",
    "source_user",
    "destination_user",
    "application",
    "virtual_system",
    "source_zone",
    "destination_zone",
    "inbound_interface",
    "outbound_interface",
    "log_action",
    "future_use3",
    "session_id",
    "repeat_count",
    "source_port",
    "destination_port",
    "nat_source_port",
    "nat_destination_port",
    "flags",
    "protocol",
    "action",
    "bytes",
    "bytes_sent",
    "bytes_received",
    "packets",
    "start_time",
    "elapsed_time",
    "category",
    "future_use4",
    "sequence_number",
    "action_flags",
    "source_location",
    "destination_location",
    "future_use5",
    "packets_sent",
    "packets_received",
    "session_end_reason",
    "device_group_hierarchy_level_1",
    "device_group_hierarchy_level_2",
    "device_group_hierarchy_level_3",
    "device_group_hierarchy_level_4",
    "virtual_system_name",
    "device_name",
    "action_source",
    "source_vm_uuid",
    "destination_vm_uuid",
    "tunnel_id_imsi",
    "monitor_tag_imei",
    "parent_session_id",
    "parent_start_time",
    "tunnel_type",
];

static THREAT_FIELDS: &[&str] = &[
    "future_use1",
    "receive_time",
    "serial_number",
    "type",
    "threat_content_type",
    "future_use2",
    "generated_time",
    "source_address",
    "destination_address",
    "nat_source_ip",
    "nat_destination_ip",
    "rule_name",
    "source_user",
    "destination_user",
    "application",
    "virtual_system",
    "source_zone",
    "destination_zone",
    "inbound_interface",
    "outbound_interface",
    "log_action",
    "future_use3",
    "session_id",
    "repeat_count",
    "source_port",
    "destination_port",
    "nat_source_port",
    "nat_destination_port",
    "flags",
    "protocol",
    "action",
    "url_filename",
    "threat_id",
    "category",
    "severity",
    "direction",
    "sequence_number",
    "action_flags",
    "source_location",
    "destination_location",
    "future_use4",
    "content_type",
    "pcap_id",
    "file_digest",
    "cloud",
    "url_index",
    "user_agent",
    "file_type",
    "x_forwarded_for",
    "referer",
    "sender",
    "subject",
    "recipient",
    "report_id",
    "device_group_hierarchy_level_1",
    "device_group_hierarchy_level_2",
    "device_group_hierarchy_level_3",
    "device_group_hierarchy_level_4",
    "virtual_system_name",
    "device_name",
    "future_use5",
    "source_vm_uuid",
    "destination_vm_uuid",
    "http_method",
    "tunnel_id_imsi",
    "monitor_tag_imei",
    "parent_session_id",
    "parent_start_time",
    "tunnel_type",
    "threat_category",
    "content_version",
];

static SYSTEM_FIELDS: &[&str] = &[
    "future_use1",
    "receive_time",
    "serial_number",
    "type",
    "content_threat_type",
    "future_use2",
    "generated_time",
    "virtual_system",
    "event_id",
    "object",
    "future_use3",
    "future_use4",
    "module",
    "severity",
    "description",
    "sequence_number",
    "action_flags",
    "device_group_hierarchy_level_1",
    "device_group_hierarchy_level_2",
    "device_group_hierarchy_level_3",
    "device_group_hierarchy_level_4",
    "virtual_system_name",
    "device_name",
];

static CONFIG_FIELDS: &[&str] = &[
    "future_use1",
    "receive_time",
    "serial_number",
    "type",
    "subtype",
    "future_use2",
    "generated_time",
    "host",
    "virtual_system",
    "command",
    "admin",
    "client",
    "result",
    "configuration_path",
    "before_change_detail",
    "after_change_detail",
    "sequence_number",
    "action_flags",
    "device_group_hierarchy_level_1",
    "device_group_hierarchy_level_2",
    "device_group_hierarchy_level_3",
    "device_group_hierarchy_level_4",
    "virtual_system_name",
    "device_name",
];

static HIPMATCH_FIELDS: &[&str] = &[
    "future_use1",
    "receive_time",
    "serial_number",
    "type",
    "threat_content_type",
    "future_use2",
    "generated_time",
    "source_user",
    "virtual_system",
    "machine_name",
    "os",
    "source_address",
    "hip",
    "repeat_count",
    "hip_type",
    "future_use3",
    "future_use4",
    "sequence_number",
    "action_flags",
    "device_group_hierarchy_level_1",
    "device_group_hierarchy_level_2",
    "device_group_hierarchy_level_3",
    "device_group_hierarchy_level_4",
    "virtual_system_name",
    "device_name",
    "virtual_system_id",
    "ipv6_source_address",
];

static USERID_FIELDS: &[&str] = &[
    "future_use1",
    "receive_time",
    "serial_number",
    "type",
    "threat_content_type",
    "future_use2",
    "generated_time",
    "virtual_system",
    "source_ip",
    "user",
    "datasource_name",
    "event_id",
    "repeat_count",
    "time_out_threshold",
    "source_port",
    "destination_port",
    "datasource",
    "datasource_type",
    "sequence_number",
    "action_flags",
    "device_group_hierarchy_level_1",
    "device_group_hierarchy_level_2",
    "device_group_hierarchy_level_3",
    "device_group_hierarchy_level_4",
    "virtual_system_name",
    "device_name",
    "virtual_system_id",
    "factor_type",
    "factor_completion_time",
    "factor_number",
];

fn field_names_for(log_type: &str) -> Option<&'static [&'static str]> {
    match log_type.to_uppercase().as_str() {
        "TRAFFIC" => Some(TRAFFIC_FIELDS),
        "THREAT" => Some(THREAT_FIELDS),
        "SYSTEM" => Some(SYSTEM_FIELDS),
        "CONFIG" => Some(CONFIG_FIELDS),
        "HIPMATCH" => Some(HIPMATCH_FIELDS),
        "USERID" => Some(USERID_FIELDS),
        _ => None,
    }
}

pub struct PaloAltoNGFWCSVDecoder;

impl MessagePlugin for PaloAltoNGFWCSVDecoder {
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool {
        let Some(message) = event.message().map(str::to_string) else {
            return false;
        };

        let Some(fields) = cache.csv(&message) else {
            return false;
        };
        if fields.len() <= 3 {
            return false;
        }

        let log_type = fields[3].clone();
        let Some(field_names) = field_names_for(&log_type) else {
            return false;
        };

        let event_data: Map<String, Value> = field_names
            .iter()
            .zip(fields)
            .map(|(name, value)| (name.to_string(), Value::String(value.clone())))
            .collect();

        self.apply_field_mapping(event, event_data, &log_type.to_lowercase(), None);
        self.set_source_producer(event, "paloalto", "ngfw");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_anchored_columns_stay_put() {
        for fields in [
            TRAFFIC_FIELDS,
            THREAT_FIELDS,
            SYSTEM_FIELDS,
            CONFIG_FIELDS,
            HIPMATCH_FIELDS,
            USERID_FIELDS,
        ] {
            assert_eq!(fields[2], "serial_number");
            assert_eq!(fields[3], "type");
        }
        assert_eq!(TRAFFIC_FIELDS[4], "threat_content_type");
        assert_eq!(THREAT_FIELDS[4], "threat_content_type");
    }

    #[test]
    fn unknown_types_are_not_matched() {
        assert!(field_names_for("GLOBALPROTECT").is_none());
        assert!(field_names_for("traffic").is_some());
    }
}
