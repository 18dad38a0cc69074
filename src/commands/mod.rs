// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bills;
pub mod doctor;
pub mod expenses;
pub mod exporter;
pub mod income;
pub mod invoices;
pub mod profile;
pub mod reports;
