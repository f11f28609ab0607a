//! ABI definitions of the deployed contracts.

#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// Registry of KYC submissions, reviewed by its owner.
    interface IKycRegistry {
        event KYCRequested(address indexed user, string name, string cnic);
        event KYCApproved(address indexed user);
        event KYCRejected(address indexed user);

        function kycRequests(address user)
            external
            view
            returns (string memory name, string memory cnic, bool approved, bool exists);
        function isVerified(address user) external view returns (bool);
        function submitKYC(string calldata name, string calldata cnic) external;
        function approveKYC(address user) external;
        function rejectKYC(address user) external;
        function owner() external view returns (address);
    }
}

sol! {
    /// Campaign ledger holding contributed funds until the creator withdraws.
    interface ICrowdfunding {
        function campaignCount() external view returns (uint256);
        function campaigns(uint256 id)
            external
            view
            returns (
                string memory title,
                string memory description,
                uint256 goal,
                uint256 fundsRaised,
                address creator,
                bool active,
                bool completed,
                bool withdrawn
            );
        function createCampaign(string calldata title, string calldata description, uint256 goal)
            external;
        function contribute(uint256 id) external payable;
        function withdraw(uint256 id) external;
    }
}
