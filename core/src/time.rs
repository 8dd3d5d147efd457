// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Time related utils.

use chrono::Utc;
use std::time::Duration;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Create datetime from unix epoch seconds.
///
/// Out-of-range values are clamped to the unix epoch.
pub fn from_epoch(secs: i64) -> DateTime {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Add a std duration to the given datetime, saturating on overflow.
pub fn add_duration(time: DateTime, duration: Duration) -> DateTime {
    chrono::TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| time.checked_add_signed(delta))
        .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC)
}

/// Format time into unix epoch seconds: "1554410829"
pub fn format_epoch(time: DateTime) -> String {
    time.timestamp().to_string()
}
