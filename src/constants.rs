// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variable holding the cloud API key
pub const API_KEY_ENV: &str = "IBMCLOUD_API_KEY";

/// Suffixes appended to the zone name to derive per-cluster identifiers
pub mod naming {
    pub const CLUSTER_NAME_SUFFIX: &str = "hyp-e2e";
    pub const INFRA_ID_SUFFIX: &str = "hyp-e2e-infra";
}

/// OAuth implicit-grant parameters understood by the OpenShift OAuth server
pub mod oauth {
    pub const DISCOVERY_PATH: &str = "/.well-known/oauth-authorization-server";
    pub const AUTHORIZE_PATH: &str = "/oauth/authorize";
    /// Public client that is allowed to receive tokens through the implicit grant
    pub const CLIENT_ID: &str = "openshift-challenging-client";
    pub const BASIC_AUTH_USER: &str = "apikey";
    /// Any non-empty value satisfies the OAuth server's CSRF check
    pub const CSRF_HEADER: &str = "X-CSRF-Token";
    pub const CSRF_VALUE: &str = "a";
    pub const ACCESS_TOKEN_KEY: &str = "access_token";
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
    pub const MAX_REDIRECTS: usize = 10;
}

/// Fixed settings of the Power VS hosted clusters created by a run
pub mod platform {
    pub const CONTAINER_SERVICE_PLUGIN: &str = "container-service";
    pub const CONTROL_PLANE_AVAILABILITY: &str = "SingleReplica";
    pub const SERVICE_CIDR: &str = "172.31.0.0/16";
    pub const POD_CIDR: &str = "10.132.0.0/14";
    pub const SYS_TYPE: &str = "s922";
    pub const PROC_TYPE: &str = "shared";
    pub const PROCESSORS: &str = "0.5";
    pub const MEMORY_GIB: u32 = 32;
}

/// Defaults for optional configuration keys
pub mod defaults {
    pub const NAMESPACE: &str = "clusters";
    pub const RELEASE_FEED: &str =
        "https://api.openshift.com/api/upgrades_info/v1/graph?channel=stable-4.14&arch=multi";
    pub const CLOUD_CLI: &str = "ibmcloud";
    pub const CLUSTER_CLI: &str = "oc";
    pub const LIFECYCLE_TOOL: &str = "./hypershift-main/bin/hypershift";
    pub const PREREQ_READY_TIMEOUT_SECS: u64 = 300;
}

/// CRD polling configuration
pub mod crd {
    pub const HYPERSHIFT_GROUP: &str = "hypershift.openshift.io";
    pub const HOSTED_CLUSTER_KIND: &str = "HostedCluster";
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
