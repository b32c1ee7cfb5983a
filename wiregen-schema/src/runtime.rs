//! Well-known proto files bundled with wiregen.
//!
//! These resolve without any caller-supplied root, under the sentinel base
//! [`RUNTIME_BASE`].

use wiregen_core::Location;

/// Base used in locations of bundled files.
pub const RUNTIME_BASE: &str = "wiregen-runtime";

const RUNTIME_PROTOS: &[(&str, &str)] = &[
    (
        "google/protobuf/any.proto",
        r#"syntax = "proto3";
package google.protobuf;

message Any {
  string type_url = 1;
  bytes value = 2;
}
"#,
    ),
    (
        "google/protobuf/duration.proto",
        r#"syntax = "proto3";
package google.protobuf;

message Duration {
  int64 seconds = 1;
  int32 nanos = 2;
}
"#,
    ),
    (
        "google/protobuf/empty.proto",
        r#"syntax = "proto3";
package google.protobuf;

message Empty {}
"#,
    ),
    (
        "google/protobuf/field_mask.proto",
        r#"syntax = "proto3";
package google.protobuf;

message FieldMask {
  repeated string paths = 1;
}
"#,
    ),
    (
        "google/protobuf/struct.proto",
        r#"syntax = "proto3";
package google.protobuf;

message Struct {
  map<string, Value> fields = 1;
}

message Value {
  oneof kind {
    NullValue null_value = 1;
    double number_value = 2;
    string string_value = 3;
    bool bool_value = 4;
    Struct struct_value = 5;
    ListValue list_value = 6;
  }
}

enum NullValue {
  NULL_VALUE = 0;
}

message ListValue {
  repeated Value values = 1;
}
"#,
    ),
    (
        "google/protobuf/timestamp.proto",
        r#"syntax = "proto3";
package google.protobuf;

message Timestamp {
  int64 seconds = 1;
  int32 nanos = 2;
}
"#,
    ),
    (
        "google/protobuf/wrappers.proto",
        r#"syntax = "proto3";
package google.protobuf;

message DoubleValue { double value = 1; }
message FloatValue { float value = 1; }
message Int64Value { int64 value = 1; }
message UInt64Value { uint64 value = 1; }
message Int32Value { int32 value = 1; }
message UInt32Value { uint32 value = 1; }
message BoolValue { bool value = 1; }
message StringValue { string value = 1; }
message BytesValue { bytes value = 1; }
"#,
    ),
];

/// Whether `path` names a bundled file.
pub fn is_runtime_proto(path: &str) -> bool {
    source(path).is_some()
}

/// The bundled source for `path`.
pub fn source(path: &str) -> Option<&'static str> {
    RUNTIME_PROTOS
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, src)| *src)
}

/// Location of a bundled file.
pub fn location(path: &str) -> Location {
    Location::new(RUNTIME_BASE, path)
}

/// Whether a location points into the bundled files.
pub fn is_runtime_location(location: &Location) -> bool {
    location.base() == RUNTIME_BASE
}
